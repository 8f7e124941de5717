//! Core business logic for AutoVtex.
//!
//! # Modules
//!
//! - [`header`] - image header reader (dimensions only)
//! - [`validation`] - pre-export checks and the atlas capacity check
//! - [`emit`] - build script and material script generation
//! - [`export`] - export orchestration, external tools and output staging
//!
//! # Export Workflow
//!
//! 1. **Validate**: names, tooling, sequences, frames, resolution, capacity
//! 2. **Write script**: `<material>.mks` in the working directory
//! 3. **Compile**: run the sheet compositor, stage its output into
//!    `materialsrc/<material>`, run the texture compiler on it
//! 4. **Stage**: write `<material>.vmt`, relocate to the workshop folder if set
//! 5. **Report**: return an export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use autovtex::config::FileConfigProvider;
//! use autovtex::core::export::ExportOrchestrator;
//! use autovtex::domain::SequenceSet;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut set = SequenceSet::new("fire");
//! set.add_sequence(Some("Burn".to_string()), vec!["fire_01.tga".into()]);
//!
//! let provider = FileConfigProvider::new("autovtex.toml");
//! let mut orchestrator = ExportOrchestrator::new();
//! let summary = orchestrator.execute(&set, &provider)?;
//!
//! println!("Output: {}", summary.output_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod export;
pub mod header;
pub mod validation;
