//! Configuration management for AutoVtex.
//!
//! This module provides TOML-based preferences loading, parsing, and validation,
//! plus the [`ConfigProvider`] seam the export orchestrator reads through.
//!
//! # Overview
//!
//! AutoVtex uses a TOML preferences file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `AUTOVTEX_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use autovtex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("autovtex.toml")?;
//!
//! println!("Install dir: {}", config.game.install_dir.display());
//! println!("Workshop export: {}", config.output.workshop_export);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`GameConfig`] - Engine install root and tool names
//! - [`OutputConfig`] - Workshop relocation and reveal toggle
//! - [`ExportConfig`] - Exit-code policy and working directory
//! - [`MaterialParameters`](crate::domain::MaterialParameters) - Material defaults
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [game]
//! install_dir = "${STEAM_ROOT}/steamapps/common/Team Fortress 2"
//!
//! [output]
//! workshop_export = true
//! workshop_folder = "flames"
//!
//! [material]
//! shader = "SpriteCard"
//! additive = true
//! ```

pub mod loader;
pub mod provider;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use provider::{ConfigProvider, ExportPreferences, FileConfigProvider, StaticConfigProvider};
pub use schema::{
    ApplicationConfig, AutoVtexConfig, ExportConfig, GameConfig, LoggingConfig, OutputConfig,
};
