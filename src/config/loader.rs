//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AutoVtexConfig;
use crate::domain::errors::AutoVtexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AutoVtexConfig
/// 4. Applies environment variable overrides (AUTOVTEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use autovtex::config::loader::load_config;
///
/// let config = load_config("autovtex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AutoVtexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AutoVtexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AutoVtexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads the file at `path`, or falls back to defaults when it does not exist
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AutoVtexConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    finish(AutoVtexConfig::default())
}

/// Parses configuration text with substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<AutoVtexConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: AutoVtexConfig = toml::from_str(&contents)
        .map_err(|e| AutoVtexError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

fn finish(mut config: AutoVtexConfig) -> Result<AutoVtexConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AutoVtexError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported in
/// one error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AutoVtexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_parsed<T: FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            AutoVtexError::Configuration(format!("Invalid value '{val}' for {name}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using AUTOVTEX_* prefix
///
/// Environment variables follow the pattern: AUTOVTEX_<SECTION>_<KEY>
/// For example: AUTOVTEX_GAME_INSTALL_DIR, AUTOVTEX_OUTPUT_WORKSHOP_EXPORT
fn apply_env_overrides(config: &mut AutoVtexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("AUTOVTEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Game overrides
    if let Ok(val) = std::env::var("AUTOVTEX_GAME_INSTALL_DIR") {
        config.game.install_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("AUTOVTEX_GAME_GAME_SUBDIR") {
        config.game.game_subdir = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_GAME_COMPOSITOR") {
        config.game.compositor = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_GAME_COMPILER") {
        config.game.compiler = val;
    }

    // Output overrides
    if let Some(val) = env_parsed("AUTOVTEX_OUTPUT_WORKSHOP_EXPORT")? {
        config.output.workshop_export = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_OUTPUT_WORKSHOP_FOLDER") {
        config.output.workshop_folder = val;
    }
    if let Some(val) = env_parsed("AUTOVTEX_OUTPUT_OPEN_EXPLORER")? {
        config.output.open_explorer = val;
    }

    // Export overrides
    if let Some(val) = env_parsed("AUTOVTEX_EXPORT_CHECK_EXIT_CODES")? {
        config.export.check_exit_codes = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_EXPORT_WORK_DIR") {
        config.export.work_dir = PathBuf::from(val);
    }

    // Material overrides
    if let Ok(val) = std::env::var("AUTOVTEX_MATERIAL_SHADER") {
        config.material.shader = val.parse().map_err(AutoVtexError::Configuration)?;
    }

    // Logging overrides
    if let Some(val) = env_parsed("AUTOVTEX_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("AUTOVTEX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
