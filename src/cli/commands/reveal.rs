//! Opening the output directory in the platform file browser

use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
const FILE_BROWSER: &str = "explorer";
#[cfg(target_os = "macos")]
const FILE_BROWSER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FILE_BROWSER: &str = "xdg-open";

/// Opens `dir` without waiting; failures are only logged
pub fn reveal(dir: &Path) {
    match Command::new(FILE_BROWSER).arg(dir).spawn() {
        Ok(_) => tracing::info!(path = %dir.display(), "Opened output directory"),
        Err(e) => tracing::warn!(
            path = %dir.display(),
            browser = FILE_BROWSER,
            error = %e,
            "Could not open output directory"
        ),
    }
}
