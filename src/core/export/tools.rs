//! External tool invocation
//!
//! The compositor and compiler are opaque executables. They run synchronously
//! and without a timeout; a hung tool hangs the export. [`ToolRunner`] is the
//! seam that lets tests stand in for them.

use crate::domain::{AutoVtexError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external program run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Executable path
    pub program: PathBuf,
    /// Arguments, passed without shell interpretation
    pub args: Vec<OsString>,
    /// Working directory
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    /// Creates an invocation of `program` in `working_dir`
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    /// Appends an argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Executable file name, for messages
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Command line as text, for logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| {
                let part = part.to_string_lossy();
                if part.contains(' ') {
                    format!("\"{part}\"")
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How an external program ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Exit code; `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl ToolOutcome {
    /// Outcome of a process that exited with `code`
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    /// True for exit code 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human-readable status
    pub fn describe(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs
pub trait ToolRunner {
    /// Runs `invocation` to completion
    ///
    /// # Errors
    ///
    /// Returns [`AutoVtexError::Compile`] if the program cannot be launched.
    /// A non-zero exit is not an error here; the caller decides.
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutcome>;
}

/// [`ToolRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

impl ToolRunner for ProcessToolRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        tracing::info!(
            tool = %invocation.tool_name(),
            command = %invocation.command_line(),
            working_dir = %invocation.working_dir.display(),
            "Running external tool"
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .status()
            .map_err(|e| AutoVtexError::Compile {
                tool: invocation.tool_name(),
                reason: format!("failed to launch: {e}"),
            })?;

        Ok(ToolOutcome {
            exit_code: status.code(),
        })
    }
}

/// Runs the sheet compositor on `script`
pub fn compositor_invocation(program: &Path, script: &Path, working_dir: &Path) -> ToolInvocation {
    ToolInvocation::new(program, working_dir).arg(script)
}

/// Runs the texture compiler on `metadata` for the game in `game_dir`
pub fn compiler_invocation(
    program: &Path,
    game_dir: &Path,
    metadata: &Path,
    working_dir: &Path,
) -> ToolInvocation {
    ToolInvocation::new(program, working_dir)
        .arg("-nopause")
        .arg("-game")
        .arg(game_dir)
        .arg(metadata)
}
