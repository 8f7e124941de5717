//! Export orchestration
//!
//! This module drives an export through its phases, including:
//! - The phase state machine
//! - External tool invocation
//! - Artifact staging
//! - Summary and reporting

pub mod coordinator;
pub mod phase;
pub mod staging;
pub mod summary;
pub mod tools;

pub use coordinator::{ExportOrchestrator, ExportPreview};
pub use phase::ExportPhase;
pub use summary::ExportSummary;
pub use tools::{ProcessToolRunner, ToolInvocation, ToolOutcome, ToolRunner};
