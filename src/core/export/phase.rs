//! Export state machine phases

use serde::Serialize;
use std::fmt;

/// Phase of an export attempt
///
/// ```text
/// Idle -> Validating -> ScriptWriting -> Compiling -> Staging -> Complete
///            \______________\_______________\____________\-----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    /// Nothing started
    Idle,
    /// Running pre-export checks (read-only)
    Validating,
    /// Writing the build script into the working directory
    ScriptWriting,
    /// Running the compositor and compiler
    Compiling,
    /// Writing the material script and placing final artifacts
    Staging,
    /// Finished successfully
    Complete,
    /// Stopped with an error
    Failed,
}

impl ExportPhase {
    /// True if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: ExportPhase) -> bool {
        use ExportPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, ScriptWriting)
                | (ScriptWriting, Compiling)
                | (Compiling, Staging)
                | (Staging, Complete)
                | (Validating | ScriptWriting | Compiling | Staging, Failed)
        )
    }

    /// True for `Complete` and `Failed`
    pub fn is_terminal(self) -> bool {
        matches!(self, ExportPhase::Complete | ExportPhase::Failed)
    }

    /// Phase name for logs and reports
    pub fn as_str(self) -> &'static str {
        match self {
            ExportPhase::Idle => "idle",
            ExportPhase::Validating => "validating",
            ExportPhase::ScriptWriting => "script_writing",
            ExportPhase::Compiling => "compiling",
            ExportPhase::Staging => "staging",
            ExportPhase::Complete => "complete",
            ExportPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
