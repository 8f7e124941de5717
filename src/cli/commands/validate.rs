//! Validate command implementation
//!
//! This module implements the `validate` command: every pre-export check,
//! all problems reported at once, nothing written.

use super::source::SequenceSourceArgs;
use super::{exit_code_for, print_report, report_exit_code};
use crate::config::load_config_or_default;
use crate::core::validation::ExportValidator;
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Sequences to check
    #[command(flatten)]
    pub source: SequenceSourceArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating export inputs");

        let prefs = match load_config_or_default(config_path) {
            Ok(config) => config.preferences(),
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let set = match self.source.load() {
            Ok(set) => set,
            Err(e) => {
                println!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let target = prefs.target(set.material_name());
        let report = ExportValidator::default().validate(&set, &target);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if report.is_empty() {
            println!("✅ Ready to export '{}'", set.material_name());
            println!();
            println!("  Sequences: {}", set.len());
            println!("  Frames: {}", report.frame_count());
            if let Some(cell) = report.cell_size() {
                println!("  Cell size: {cell}x{cell}");
            }
            println!("  Output: {}", target.output_dir().display());
            println!();
        } else {
            print_report(&report);
        }

        Ok(report_exit_code(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_creation() {
        let args = ValidateArgs {
            source: SequenceSourceArgs::default(),
            json: true,
        };
        assert!(format!("{args:?}").contains("json: true"));
    }
}
