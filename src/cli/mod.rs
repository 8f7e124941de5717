//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for AutoVtex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// AutoVtex - sprite sheet sequence builder for Source engine materials
#[derive(Parser, Debug)]
#[command(name = "autovtex")]
#[command(version, about, long_about = None)]
#[command(author = "AutoVtex Contributors")]
pub struct Cli {
    /// Path to preferences file
    #[arg(short, long, default_value = "autovtex.toml", env = "AUTOVTEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AUTOVTEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, compile and stage an animated sprite sheet material
    Export(commands::export::ExportArgs),

    /// Run every pre-export check and report all problems
    Validate(commands::validate::ValidateArgs),

    /// Write a sample preferences file (and optionally a sample project)
    Init(commands::init::InitArgs),
}
