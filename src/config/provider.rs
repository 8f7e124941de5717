//! Per-export preference access
//!
//! The orchestrator never holds configuration. It asks a [`ConfigProvider`]
//! at the start of each export, so edits to the preferences file between two
//! exports take effect without a restart.

use super::loader::load_config;
use crate::domain::{AutoVtexError, ExportTarget, MaterialParameters, Result, ToolLayout};
use std::path::{Path, PathBuf};

/// Plain read-only inputs for one export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPreferences {
    /// Engine install root
    pub install_dir: PathBuf,
    /// Tool names and game folder
    pub layout: ToolLayout,
    /// Relocate final artifacts to the workshop directory
    pub workshop_export: bool,
    /// Workshop folder name (empty = material name)
    pub workshop_folder: String,
    /// Reveal the output directory after a successful export
    pub open_explorer: bool,
    /// Treat non-zero tool exit codes as failures
    pub check_exit_codes: bool,
    /// Where the build script and intermediates are written
    pub work_dir: PathBuf,
    /// Material script parameters
    pub material: MaterialParameters,
}

impl Default for ExportPreferences {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::new(),
            layout: ToolLayout::default(),
            workshop_export: false,
            workshop_folder: String::new(),
            open_explorer: false,
            check_exit_codes: true,
            work_dir: PathBuf::from("."),
            material: MaterialParameters::default(),
        }
    }
}

impl ExportPreferences {
    /// Resolves the export layout for `material`
    pub fn target(&self, material: &str) -> ExportTarget {
        ExportTarget::resolve(&self.install_dir, &self.layout, material)
            .with_custom_folder(&self.workshop_folder)
            .with_workshop_export(self.workshop_export)
    }

    /// Copy with `install_dir` and `work_dir` resolved against the current
    /// directory
    ///
    /// External tools run with `work_dir` as their working directory, so every
    /// path handed to them must already be absolute. An empty `install_dir`
    /// is left empty for validation to report.
    ///
    /// # Errors
    ///
    /// Returns [`AutoVtexError::Configuration`] if the current directory
    /// cannot be determined
    pub fn with_absolute_paths(&self) -> Result<Self> {
        Ok(Self {
            install_dir: absolute(&self.install_dir)?,
            work_dir: absolute(&self.work_dir)?,
            ..self.clone()
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::path::absolute(path).map_err(|e| {
        AutoVtexError::Configuration(format!("Cannot resolve {}: {e}", path.display()))
    })
}

/// Source of export preferences
pub trait ConfigProvider {
    /// Current preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read or is invalid
    fn preferences(&self) -> Result<ExportPreferences>;
}

/// Reads the preferences file again on every call
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Creates a provider for the TOML file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preferences file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileConfigProvider {
    fn preferences(&self) -> Result<ExportPreferences> {
        tracing::debug!(path = %self.path.display(), "Reading preferences");
        Ok(load_config(&self.path)?.preferences())
    }
}

/// Returns the same preferences every time
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    preferences: ExportPreferences,
}

impl StaticConfigProvider {
    /// Wraps fixed preferences
    pub fn new(preferences: ExportPreferences) -> Self {
        Self { preferences }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn preferences(&self) -> Result<ExportPreferences> {
        Ok(self.preferences.clone())
    }
}
