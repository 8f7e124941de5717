//! Export summary and reporting
//!
//! This module defines the record of a finished export.

use super::phase::ExportPhase;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a successful export
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Material name
    pub material: String,

    /// Phases visited, in order
    pub phases: Vec<ExportPhase>,

    /// Number of sequences exported
    pub sequence_count: usize,

    /// Number of frames exported
    pub frame_count: usize,

    /// Edge length of one atlas cell in pixels
    pub cell_size: Option<u32>,

    /// Final locations of every placed artifact
    pub staged: Vec<PathBuf>,

    /// Directory holding the compiled texture and material script
    pub output_dir: PathBuf,

    /// When the export started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration
    #[serde(with = "duration_millis")]
    pub duration: Duration,

    /// Non-fatal problems (ignored exit codes, leftover directories)
    pub warnings: Vec<String>,
}

impl ExportSummary {
    /// Creates an empty summary for `material`
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            phases: Vec::new(),
            sequence_count: 0,
            frame_count: 0,
            cell_size: None,
            staged: Vec::new(),
            output_dir: PathBuf::new(),
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            warnings: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// True if the last recorded phase is `Complete`
    pub fn is_complete(&self) -> bool {
        self.phases.last() == Some(&ExportPhase::Complete)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            material = %self.material,
            sequences = self.sequence_count,
            frames = self.frame_count,
            cell_size = ?self.cell_size,
            artifacts = self.staged.len(),
            output_dir = %self.output_dir.display(),
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.warnings.is_empty() {
            tracing::warn!(
                warning_count = self.warnings.len(),
                "Export completed with warnings"
            );
            for warning in &self.warnings {
                tracing::warn!(message = %warning, "Export warning");
            }
        }
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new("fire");

        assert_eq!(summary.material, "fire");
        assert!(summary.phases.is_empty());
        assert!(summary.staged.is_empty());
        assert!(summary.warnings.is_empty());
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new("fire").with_duration(Duration::from_millis(1500));
        assert_eq!(summary.duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_is_complete() {
        let mut summary = ExportSummary::new("fire");
        summary.phases = vec![ExportPhase::Validating, ExportPhase::Complete];
        assert!(summary.is_complete());
    }

    #[test]
    fn test_serializes_duration_as_millis() {
        let mut summary = ExportSummary::new("fire").with_duration(Duration::from_millis(42));
        summary.add_warning("vtex.exe exited with exit status 1");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["duration"], 42);
        assert_eq!(json["warnings"][0], "vtex.exe exited with exit status 1");
    }
}
