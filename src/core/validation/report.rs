//! Validation report
//!
//! Collects every problem found before an export so the user can fix all of
//! them in one pass.

use serde::Serialize;
use std::fmt;

/// Broad class of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Bad names, missing frames, wrong resolutions, empty sequences
    Input,
    /// External compiler executables not found
    ToolingMissing,
    /// Frames do not fit into the composite texture
    Capacity,
}

/// Specific kind of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Material name empty or containing reserved characters
    InvalidMaterialName,
    /// Custom output folder containing reserved characters
    InvalidFolderName,
    /// Compositor or compiler executable missing
    ToolingMissing,
    /// The set has no sequences at all
    NoSequences,
    /// A sequence has no frames
    EmptySequence,
    /// A frame file no longer exists
    MissingFrame,
    /// A frame's header could not be read
    UnreadableHeader,
    /// A frame is not square (or has non-positive size)
    NonSquare,
    /// Frames do not share one size
    InconsistentResolution,
    /// Frames overflow the composite texture
    CapacityExceeded,
}

impl IssueKind {
    /// Category this kind belongs to
    pub fn category(&self) -> IssueCategory {
        match self {
            IssueKind::ToolingMissing => IssueCategory::ToolingMissing,
            IssueKind::CapacityExceeded => IssueCategory::Capacity,
            _ => IssueCategory::Input,
        }
    }
}

/// One human-readable problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Issue kind
    pub kind: IssueKind,
    /// Message shown to the user
    pub message: String,
}

/// Ordered list of validation issues plus what was learned about the frames
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    frame_count: usize,
    cell_size: Option<u32>,
}

impl ValidationReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue; an identical issue already present is ignored
    pub fn push(&mut self, kind: IssueKind, message: impl Into<String>) {
        let issue = ValidationIssue {
            kind,
            message: message.into(),
        };
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
    }

    /// True if export may proceed
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Issues in the order they were found
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issue messages in order
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }

    /// True if any issue has `kind`
    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// True if any issue falls in `category`
    pub fn has_category(&self, category: IssueCategory) -> bool {
        self.issues.iter().any(|i| i.kind.category() == category)
    }

    /// Number of frames whose headers were read
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Common square frame size, when one was established
    pub fn cell_size(&self) -> Option<u32> {
        self.cell_size
    }

    pub(crate) fn set_frame_stats(&mut self, frame_count: usize, cell_size: Option<u32>) {
        self.frame_count = frame_count;
        self.cell_size = cell_size;
    }

    /// Logs each issue at warn level
    pub fn log_issues(&self) {
        for issue in &self.issues {
            tracing::warn!(kind = ?issue.kind, message = %issue.message, "Validation issue");
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The following errors have occurred:\n\n{}", self.messages().join("\n\n"))
    }
}
