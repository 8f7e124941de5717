//! CLI command implementations
//!
//! Commands return `anyhow::Result<i32>` where the `i32` is the process exit
//! code:
//!
//! | code | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | success                                   |
//! | 1    | export failed after validation            |
//! | 2    | configuration, project or validation error |
//! | 3    | texture tools not found                   |
//! | 5    | fatal error                               |

pub mod export;
pub mod init;
pub mod reveal;
pub mod source;
pub mod validate;

use crate::core::validation::{IssueCategory, ValidationReport};
use crate::domain::AutoVtexError;

/// Exit code for a failed command
pub fn exit_code_for(error: &AutoVtexError) -> i32 {
    match error {
        AutoVtexError::Validation(report) => report_exit_code(report),
        AutoVtexError::ToolingMissing { .. } => 3,
        AutoVtexError::Configuration(_) | AutoVtexError::Project(_) => 2,
        AutoVtexError::Compile { .. } | AutoVtexError::Staging { .. } => 1,
        _ => 5,
    }
}

/// Exit code for a validation outcome
pub fn report_exit_code(report: &ValidationReport) -> i32 {
    if report.is_empty() {
        0
    } else if report
        .issues()
        .iter()
        .all(|issue| issue.kind.category() == IssueCategory::ToolingMissing)
    {
        3
    } else {
        2
    }
}

/// Prints a validation report the way the editor's error dialog showed it
pub(crate) fn print_report(report: &ValidationReport) {
    println!("❌ {} problem(s) found", report.len());
    println!();
    for message in report.messages() {
        for line in message.lines() {
            println!("   {line}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::IssueKind;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let mut report = ValidationReport::new();
        assert_eq!(report_exit_code(&report), 0);

        report.push(IssueKind::ToolingMissing, "tools");
        assert_eq!(report_exit_code(&report), 3);

        report.push(IssueKind::NoSequences, "none");
        assert_eq!(report_exit_code(&report), 2);
        assert_eq!(exit_code_for(&AutoVtexError::Validation(report)), 2);

        assert_eq!(
            exit_code_for(&AutoVtexError::staging(PathBuf::from("x"), "locked")),
            1
        );
        assert_eq!(
            exit_code_for(&AutoVtexError::Compile {
                tool: "vtex.exe".into(),
                reason: "exit status 1".into()
            }),
            1
        );
        assert_eq!(
            exit_code_for(&AutoVtexError::Configuration("bad".into())),
            2
        );
        assert_eq!(exit_code_for(&AutoVtexError::Other("boom".into())), 5);
    }
}
