// AutoVtex - Sprite Sheet Sequence Builder for Source Engine Materials
// Copyright (c) 2025 AutoVtex Contributors
// Licensed under the MIT License

use autovtex::cli::{Cli, Commands};
use autovtex::config::{load_config_or_default, LoggingConfig};
use autovtex::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken preferences file is reported by the command itself; logging
    // falls back to console-only defaults here.
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "AutoVtex - Sprite Sheet Sequence Builder"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // Flush file logs before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config),
        Commands::Validate(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
