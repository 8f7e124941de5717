// AutoVtex - Sprite Sheet Sequence Builder for Source Engine Materials
// Copyright (c) 2025 AutoVtex Contributors
// Licensed under the MIT License

//! # AutoVtex - Sprite Sheet Sequence Builder
//!
//! AutoVtex turns ordered groups of Targa frames into an animated sprite sheet
//! material: it checks the frames, writes the sheet compositor's build script,
//! drives the external compositor and texture compiler, and places the
//! compiled texture and generated material script where the game expects them.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Header reading, validation, script emission, export orchestration
//! - [`domain`] - Sequences, frames, material parameters, export layout, errors
//! - [`project`] - Project files and dropped-file grouping
//! - [`config`] - Preferences file and per-export configuration provider
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autovtex::config::FileConfigProvider;
//! use autovtex::core::export::ExportOrchestrator;
//! use autovtex::domain::SequenceSet;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut set = SequenceSet::new("walk_cycle");
//!     set.add_sequence(
//!         Some("Walk".to_string()),
//!         vec!["walk-01.tga".into(), "walk-02.tga".into()],
//!     );
//!
//!     let provider = FileConfigProvider::new("autovtex.toml");
//!     let summary = ExportOrchestrator::new().execute(&set, &provider)?;
//!
//!     println!("Staged {} files into {}", summary.staged.len(), summary.output_dir.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Pre-export problems
//! are collected into one [`core::validation::ValidationReport`] rather than
//! failing on the first:
//!
//! ```rust,no_run
//! use autovtex::core::validation::ExportValidator;
//! use autovtex::domain::{ExportTarget, SequenceSet, ToolLayout};
//!
//! let set = SequenceSet::new("fire");
//! let target = ExportTarget::resolve("/games/tf2", &ToolLayout::default(), "fire");
//! let report = ExportValidator::default().validate(&set, &target);
//! for message in report.messages() {
//!     eprintln!("{message}");
//! }
//! ```
//!
//! ## Logging
//!
//! AutoVtex uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(material = "fire", "Starting export");
//! warn!(path = "C:/art/fire-01.tga", "File moved or missing");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod project;
