//! Configuration schema types
//!
//! This module defines the preferences file structure for AutoVtex.

use super::provider::ExportPreferences;
use crate::domain::{MaterialParameters, ToolLayout};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main AutoVtex configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoVtexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Engine install and tool names
    #[serde(default)]
    pub game: GameConfig,

    /// Output destination settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Export behaviour
    #[serde(default)]
    pub export: ExportConfig,

    /// Default material parameters
    #[serde(default)]
    pub material: MaterialParameters,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AutoVtexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.game.validate()?;
        self.material.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Flattens the configuration into per-export preferences
    pub fn preferences(&self) -> ExportPreferences {
        ExportPreferences {
            install_dir: self.game.install_dir.clone(),
            layout: self.game.layout(),
            workshop_export: self.output.workshop_export,
            workshop_folder: self.output.workshop_folder.clone(),
            open_explorer: self.output.open_explorer,
            check_exit_codes: self.export.check_exit_codes,
            work_dir: self.export.work_dir.clone(),
            material: self.material.clone(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Engine install configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Engine install root (contains `bin/`)
    #[serde(default)]
    pub install_dir: PathBuf,

    /// Game content folder below the install root
    #[serde(default = "default_game_subdir")]
    pub game_subdir: String,

    /// Sheet compositor executable name
    #[serde(default = "default_compositor")]
    pub compositor: String,

    /// Texture compiler executable name
    #[serde(default = "default_compiler")]
    pub compiler: String,
}

impl GameConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("game.game_subdir", &self.game_subdir),
            ("game.compositor", &self.compositor),
            ("game.compiler", &self.compiler),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{key} cannot be empty"));
            }
            if value.contains(['/', '\\']) {
                return Err(format!("{key} must be a plain name, got '{value}'"));
            }
        }
        Ok(())
    }

    /// Tool names and game folder as a [`ToolLayout`]
    pub fn layout(&self) -> ToolLayout {
        ToolLayout {
            game_subdir: self.game_subdir.clone(),
            compositor: self.compositor.clone(),
            compiler: self.compiler.clone(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::new(),
            game_subdir: default_game_subdir(),
            compositor: default_compositor(),
            compiler: default_compiler(),
        }
    }
}

/// Output destination configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Relocate the compiled texture and material script to the workshop folder
    #[serde(default)]
    pub workshop_export: bool,

    /// Workshop folder name (empty = material name)
    #[serde(default)]
    pub workshop_folder: String,

    /// Open the output directory in the file browser after export
    #[serde(default)]
    pub open_explorer: bool,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Fail the export when an external tool exits non-zero
    #[serde(default = "default_true")]
    pub check_exit_codes: bool,

    /// Directory the build script and intermediates are written to
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            check_exit_codes: true,
            work_dir: default_work_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_game_subdir() -> String {
    "tf".to_string()
}

fn default_compositor() -> String {
    "mksheet.exe".to_string()
}

fn default_compiler() -> String {
    "vtex.exe".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
