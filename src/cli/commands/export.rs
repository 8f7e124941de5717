//! Export command implementation
//!
//! This module implements the `export` command: validate, write the build
//! script, run the compositor and compiler, then stage the results.

use super::reveal::reveal;
use super::source::SequenceSourceArgs;
use super::{exit_code_for, print_report, report_exit_code};
use crate::config::{load_config_or_default, ExportPreferences};
use crate::core::export::{ExportOrchestrator, ExportSummary};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Sequences to export
    #[command(flatten)]
    pub source: SequenceSourceArgs,

    /// Validate and print both scripts without writing or compiling anything
    #[arg(long)]
    pub dry_run: bool,

    /// Override the engine install directory
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Relocate the output into this workshop folder
    #[arg(long, value_name = "NAME")]
    pub workshop_folder: Option<String>,

    /// Do not open the output directory afterwards
    #[arg(long)]
    pub no_reveal: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut prefs = match load_config_or_default(config_path) {
            Ok(config) => config.preferences(),
            Err(e) => {
                tracing::error!(error = %e, "Configuration load failed");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        self.apply_overrides(&mut prefs);

        let set = match self.source.load() {
            Ok(set) => set,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.dry_run {
            return Ok(Self::dry_run(&set, &prefs));
        }

        println!("🚀 Exporting material '{}'...", set.material_name());
        println!();

        let mut orchestrator = ExportOrchestrator::new();
        let summary = match orchestrator.run(&set, &prefs) {
            Ok(summary) => summary,
            Err(crate::domain::AutoVtexError::Validation(report)) => {
                print_report(&report);
                return Ok(report_exit_code(&report));
            }
            Err(e) => {
                eprintln!("❌ Export failed during {}: {e}", phase_name(&orchestrator));
                return Ok(exit_code_for(&e));
            }
        };

        Self::print_summary(&summary);

        if prefs.open_explorer && !self.no_reveal {
            reveal(&summary.output_dir);
        }
        Ok(0)
    }

    fn apply_overrides(&self, prefs: &mut ExportPreferences) {
        if let Some(dir) = &self.install_dir {
            tracing::info!(install_dir = %dir.display(), "Overriding install directory from CLI");
            prefs.install_dir = dir.clone();
        }
        if let Some(folder) = &self.workshop_folder {
            tracing::info!(folder = %folder, "Enabling workshop export from CLI");
            prefs.workshop_export = true;
            prefs.workshop_folder = folder.clone();
        }
    }

    fn dry_run(set: &crate::domain::SequenceSet, prefs: &ExportPreferences) -> i32 {
        tracing::info!("Dry run mode enabled - nothing will be written");
        println!("🔍 DRY RUN MODE - nothing will be written or compiled");
        println!();

        let preview = ExportOrchestrator::new().preview(set, prefs);
        if !preview.report.is_empty() {
            print_report(&preview.report);
            return report_exit_code(&preview.report);
        }

        let target = &preview.target;
        println!("✅ Validation passed");
        println!(
            "  Frames: {} ({}px cells)",
            preview.report.frame_count(),
            preview.report.cell_size().unwrap_or_default()
        );
        println!("  Script: {}", preview.script_path.display());
        println!("  Output: {}", target.output_dir().display());
        println!();
        println!("--- {} ---", target.script_file_name());
        println!("{}", preview.build_script);
        println!();
        println!("--- {} ---", target.material_file_name());
        println!("{}", preview.material_script);
        0
    }

    fn print_summary(summary: &ExportSummary) {
        println!("📊 Export Summary:");
        println!("  Material: {}", summary.material);
        println!("  Sequences: {}", summary.sequence_count);
        println!("  Frames: {}", summary.frame_count);
        if let Some(cell) = summary.cell_size {
            println!("  Cell size: {cell}x{cell}");
        }
        println!("  Output: {}", summary.output_dir.display());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
        println!("  Staged files:");
        for path in &summary.staged {
            println!("    - {}", path.display());
        }
        println!();

        if !summary.warnings.is_empty() {
            println!("⚠️  Warnings:");
            for warning in &summary.warnings {
                println!("  - {warning}");
            }
            println!();
        }
        println!("✅ Export completed successfully!");
    }
}

fn phase_name<R: crate::core::export::ToolRunner>(orchestrator: &ExportOrchestrator<R>) -> String {
    orchestrator
        .history()
        .iter()
        .rev()
        .nth(1)
        .map(|phase| phase.to_string())
        .unwrap_or_else(|| "startup".to_string())
}
