//! Export validation
//!
//! [`ExportValidator`] checks a [`SequenceSet`] against an [`ExportTarget`]
//! before anything is written. It never stops at the first problem: every
//! check runs and every issue lands in the returned [`ValidationReport`].
//! Checks run in this order:
//!
//! 1. material name present and free of reserved characters
//! 2. custom folder name free of reserved characters
//! 3. compositor and compiler executables present
//! 4. at least one sequence
//! 5. no empty sequence
//! 6. every frame file exists
//! 7. every readable frame is square
//! 8. all frames share one size (reported once)
//! 9. the frames fit the composite texture (skipped when 7 failed)
//!
//! The only filesystem access is reading file metadata and image headers.

pub mod atlas;
pub mod report;

pub use atlas::{AtlasLayoutChecker, MAX_ATLAS_EXTENT};
pub use report::{IssueCategory, IssueKind, ValidationIssue, ValidationReport};

use crate::core::header;
use crate::domain::{has_reserved_chars, Dimensions, ExportTarget, SequenceSet};

/// Pre-export checks over a sequence set
#[derive(Debug, Clone, Default)]
pub struct ExportValidator {
    layout: AtlasLayoutChecker,
}

impl ExportValidator {
    /// Creates a validator with a custom atlas checker
    pub fn new(layout: AtlasLayoutChecker) -> Self {
        Self { layout }
    }

    /// Runs every check and returns the collected issues
    pub fn validate(&self, set: &SequenceSet, target: &ExportTarget) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.check_names(set, target, &mut report);
        self.check_tooling(target, &mut report);
        self.check_sequences(set, &mut report);
        self.check_frames(set, &mut report);

        tracing::info!(
            material = %set.material_name(),
            sequences = set.len(),
            frames = report.frame_count(),
            issues = report.len(),
            "Validation finished"
        );
        report.log_issues();
        report
    }

    fn check_names(&self, set: &SequenceSet, target: &ExportTarget, report: &mut ValidationReport) {
        let material = set.material_name();
        if material.is_empty() || has_reserved_chars(material) {
            report.push(
                IssueKind::InvalidMaterialName,
                format!("Invalid material name: \"{material}\""),
            );
        }

        if let Some(folder) = target.custom_folder() {
            if has_reserved_chars(folder) {
                report.push(
                    IssueKind::InvalidFolderName,
                    format!("Invalid workshop folder name: \"{folder}\""),
                );
            }
        }
    }

    fn check_tooling(&self, target: &ExportTarget, report: &mut ValidationReport) {
        let missing = target.missing_tools();
        if !missing.is_empty() {
            report.push(
                IssueKind::ToolingMissing,
                format!(
                    "Texture tools not found!\n{} is missing {}",
                    target.install_root().join("bin").display(),
                    missing.join(" and ")
                ),
            );
        }
    }

    fn check_sequences(&self, set: &SequenceSet, report: &mut ValidationReport) {
        if set.is_empty() {
            report.push(IssueKind::NoSequences, "There are no sequences to export.");
            return;
        }
        for sequence in set.sequences().iter().filter(|s| s.is_empty()) {
            report.push(
                IssueKind::EmptySequence,
                format!("Empty sequence:\n{}", sequence.name()),
            );
        }
    }

    fn check_frames(&self, set: &SequenceSet, report: &mut ValidationReport) {
        let existing: Vec<_> = set
            .frames()
            .filter(|frame| {
                let exists = frame.exists();
                if !exists {
                    report.push(
                        IssueKind::MissingFrame,
                        format!("File moved or missing:\n{}", frame.path().display()),
                    );
                }
                exists
            })
            .collect();

        let mut sizes: Vec<Dimensions> = Vec::with_capacity(existing.len());
        let mut shape_failed = false;
        for frame in existing {
            match frame.dimensions_with(header::read_dimensions) {
                Ok(d) if d.is_square() && d.is_positive() => sizes.push(d),
                Ok(d) => {
                    shape_failed = true;
                    report.push(
                        IssueKind::NonSquare,
                        format!(
                            "File has non-square resolution ({d})\n{}",
                            frame.path().display()
                        ),
                    );
                }
                Err(e) => {
                    shape_failed = true;
                    report.push(
                        IssueKind::UnreadableHeader,
                        format!("Unreadable image header:\n{e}"),
                    );
                }
            }
        }

        let frame_count = sizes.len();
        if shape_failed {
            report.set_frame_stats(frame_count, None);
            return;
        }

        let Some(first) = sizes.first().copied() else {
            report.set_frame_stats(0, None);
            return;
        };
        if sizes.iter().any(|d| *d != first) {
            report.push(
                IssueKind::InconsistentResolution,
                "Files have different resolutions.",
            );
            report.set_frame_stats(frame_count, None);
            return;
        }

        // Square and positive, so the width is the cell size.
        let cell = first.width as u32;
        report.set_frame_stats(frame_count, Some(cell));
        if !self.layout.fits(cell, frame_count) {
            let extent = self.layout.max_extent();
            report.push(
                IssueKind::CapacityExceeded,
                format!(
                    "Too much data.\n({frame_count} frames of {first} do not fit in a {extent}x{extent} texture)"
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::targa_header;
    use crate::domain::ToolLayout;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir_all(dir.path().join("bin")).unwrap();
            std::fs::write(dir.path().join("bin/mksheet.exe"), b"").unwrap();
            std::fs::write(dir.path().join("bin/vtex.exe"), b"").unwrap();
            Self { dir }
        }

        fn frame(&self, name: &str, width: i16, height: i16) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, targa_header(width, height)).unwrap();
            path
        }

        fn target(&self, material: &str) -> ExportTarget {
            ExportTarget::resolve(self.dir.path(), &ToolLayout::default(), material)
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }
    }

    fn validate(set: &SequenceSet, target: &ExportTarget) -> ValidationReport {
        ExportValidator::default().validate(set, target)
    }

    #[test]
    fn test_valid_set_passes() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("walk_cycle");
        let frames = (0..4).map(|i| fx.frame(&format!("w{i}.tga"), 256, 256)).collect();
        set.add_sequence(Some("Walk".into()), frames);

        let report = validate(&set, &fx.target("walk_cycle"));
        assert!(report.is_empty(), "{report}");
        assert_eq!(report.frame_count(), 4);
        assert_eq!(report.cell_size(), Some(256));
    }

    #[test]
    fn test_empty_set_reports_no_sequences() {
        let fx = Fixture::new();
        let report = validate(&SequenceSet::new("fire"), &fx.target("fire"));
        assert!(report.has_kind(IssueKind::NoSequences));
        assert!(report.to_string().to_lowercase().contains("no sequences"));
    }

    #[test]
    fn test_bad_names_are_reported() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("fire/smoke");
        set.add_sequence(None, vec![fx.frame("a.tga", 64, 64)]);
        let target = fx.target("fire/smoke").with_custom_folder("bad|folder");

        let report = validate(&set, &target);
        assert!(report.has_kind(IssueKind::InvalidMaterialName));
        assert!(report.has_kind(IssueKind::InvalidFolderName));
    }

    #[test]
    fn test_empty_material_name_is_invalid() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("");
        set.add_sequence(None, vec![fx.frame("a.tga", 64, 64)]);
        let report = validate(&set, &fx.target(""));
        assert!(report.has_kind(IssueKind::InvalidMaterialName));
    }

    #[test]
    fn test_missing_tools_are_distinguishable() {
        let dir = TempDir::new().unwrap();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![]);
        let target = ExportTarget::resolve(dir.path(), &ToolLayout::default(), "fire");

        let report = validate(&set, &target);
        assert!(report.has_category(IssueCategory::ToolingMissing));
        assert!(report.has_kind(IssueKind::EmptySequence));
    }

    #[test]
    fn test_non_square_frame_blocks_export() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![fx.frame("odd.tga", 100, 120)]);

        let report = validate(&set, &fx.target("fire"));
        assert!(report.has_kind(IssueKind::NonSquare));
        assert!(report.to_string().contains("100x120"));
        assert!(!report.has_kind(IssueKind::CapacityExceeded));
        assert_eq!(report.cell_size(), None);
    }

    #[test]
    fn test_mismatch_reported_once() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(
            None,
            vec![
                fx.frame("a.tga", 64, 64),
                fx.frame("b.tga", 128, 128),
                fx.frame("c.tga", 256, 256),
                fx.frame("d.tga", 64, 64),
            ],
        );

        let report = validate(&set, &fx.target("fire"));
        let mismatches = report
            .issues()
            .iter()
            .filter(|i| i.kind == IssueKind::InconsistentResolution)
            .count();
        assert_eq!(mismatches, 1);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_issues_accumulate_across_frames() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(Some("Empty".into()), vec![]);
        set.add_sequence(
            Some("Mixed".into()),
            vec![
                fx.root().join("gone_1.tga"),
                fx.frame("wide.tga", 64, 32),
                fx.root().join("gone_2.tga"),
                fx.frame("tall.tga", 16, 48),
            ],
        );

        let report = validate(&set, &fx.target("fire"));
        let kinds: Vec<IssueKind> = report.issues().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::EmptySequence,
                IssueKind::MissingFrame,
                IssueKind::MissingFrame,
                IssueKind::NonSquare,
                IssueKind::NonSquare,
            ]
        );
    }

    #[test]
    fn test_capacity_exceeded() {
        let fx = Fixture::new();
        let frame = fx.frame("big.tga", 512, 512);
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![frame.clone(); 17]);

        let report = validate(&set, &fx.target("fire"));
        assert!(report.has_category(IssueCategory::Capacity));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_capacity_exact_fit() {
        let fx = Fixture::new();
        let frame = fx.frame("big.tga", 512, 512);
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![frame; 16]);

        assert!(validate(&set, &fx.target("fire")).is_empty());
    }

    #[test]
    fn test_truncated_header_is_reported_not_fatal() {
        let fx = Fixture::new();
        let broken = fx.root().join("broken.tga");
        std::fs::write(&broken, b"tga").unwrap();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![broken, fx.frame("ok.tga", 64, 64)]);

        let report = validate(&set, &fx.target("fire"));
        assert!(report.has_kind(IssueKind::UnreadableHeader));
        assert!(!report.has_kind(IssueKind::CapacityExceeded));
    }

    #[test]
    fn test_zero_sized_frame_is_rejected() {
        let fx = Fixture::new();
        let mut set = SequenceSet::new("fire");
        set.add_sequence(None, vec![fx.frame("zero.tga", 0, 0)]);
        let report = validate(&set, &fx.target("fire"));
        assert!(report.has_kind(IssueKind::NonSquare));
        assert!(report.to_string().contains("0x0"));
    }
}
