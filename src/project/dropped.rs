//! Grouping of dropped image files into sequences
//!
//! Files are sorted by name and grouped by the part of the file name before
//! the first `-`: `walk-01.tga` and `walk-02.tga` form a `walk` sequence.
//! Names without a `-` share one unnamed group.

use crate::domain::SequenceSet;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSION: &str = "tga";

/// Dropped paths sorted into groups, plus what was ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DroppedFiles {
    /// `(category, files)` in first-seen category order
    pub groups: Vec<(String, Vec<PathBuf>)>,
    /// Paths without the image extension
    pub not_images: Vec<PathBuf>,
    /// Paths that are not regular files
    pub not_files: Vec<PathBuf>,
}

impl DroppedFiles {
    /// True if nothing usable was dropped
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Warning text for ignored paths, one line per entry
    pub fn warning_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.not_images.is_empty() {
            lines.push("The following files were ignored for not being Targa (tga) files:".to_string());
            lines.extend(self.not_images.iter().map(|p| p.display().to_string()));
        }
        if !self.not_files.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("The following arguments were not files!".to_string());
            lines.extend(self.not_files.iter().map(|p| p.display().to_string()));
        }
        lines
    }

    /// One sequence per group; a single empty sequence when nothing was dropped
    pub fn into_sequence_set(self, material: impl Into<String>) -> SequenceSet {
        let mut set = SequenceSet::new(material);
        if self.groups.is_empty() {
            set.add_sequence(None, Vec::new());
            return set;
        }
        for (category, files) in self.groups {
            let name = (!category.is_empty()).then_some(category);
            set.add_sequence(name, files);
        }
        set
    }
}

/// Filters, sorts and groups dropped paths
pub fn group_dropped_files<I, P>(paths: I) -> DroppedFiles
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut dropped = DroppedFiles::default();
    let mut images = Vec::new();

    for path in paths.into_iter().map(Into::into) {
        let is_image = has_image_extension(&path);
        let is_file = path.is_file();
        if !is_image {
            tracing::warn!(path = %path.display(), "Ignoring non-Targa file");
            dropped.not_images.push(path.clone());
        }
        if !is_file {
            tracing::warn!(path = %path.display(), "Ignoring path that is not a file");
            dropped.not_files.push(path.clone());
        }
        if is_image && is_file {
            // Frames end up in a script run from another directory
            images.push(std::path::absolute(&path).unwrap_or(path));
        }
    }

    images.sort_by_key(|path| file_name(path));

    for path in images {
        let category = category_of(&file_name(&path));
        match dropped.groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, files)) => files.push(path),
            None => dropped.groups.push((category, vec![path])),
        }
    }

    tracing::debug!(
        groups = dropped.groups.len(),
        ignored = dropped.not_images.len() + dropped.not_files.len(),
        "Grouped dropped files"
    );
    dropped
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(IMAGE_EXTENSION))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn category_of(file_name: &str) -> String {
    file_name
        .split_once('-')
        .map(|(prefix, _)| prefix.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test_case("walk-01.tga", "walk")]
    #[test_case("fire-big-02.tga", "fire")]
    #[test_case("idle.tga", "")]
    #[test_case("-lead.tga", "")]
    fn test_category_of(name: &str, expected: &str) {
        assert_eq!(category_of(name), expected);
    }

    #[test]
    fn test_groups_sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            touch(&dir, "walk-02.tga"),
            touch(&dir, "run-01.TGA"),
            touch(&dir, "walk-01.tga"),
            touch(&dir, "plain.tga"),
        ];

        let dropped = group_dropped_files(paths);
        let summary: Vec<(&str, Vec<String>)> = dropped
            .groups
            .iter()
            .map(|(c, files)| (c.as_str(), files.iter().map(|f| file_name(f)).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("", vec!["plain.tga".to_string()]),
                ("run", vec!["run-01.TGA".to_string()]),
                ("walk", vec!["walk-01.tga".to_string(), "walk-02.tga".to_string()]),
            ]
        );
        assert!(dropped.warning_lines().is_empty());
    }

    #[test]
    fn test_ignored_paths_are_reported() {
        let dir = TempDir::new().unwrap();
        let notes = touch(&dir, "notes.txt");
        let missing = dir.path().join("gone-01.tga");
        let folder = dir.path().to_path_buf();

        let dropped = group_dropped_files(vec![notes.clone(), missing.clone(), folder.clone()]);
        assert!(dropped.is_empty());
        assert_eq!(dropped.not_images, vec![notes, folder.clone()]);
        assert_eq!(dropped.not_files, vec![missing, folder]);

        let lines = dropped.warning_lines();
        assert_eq!(
            lines[0],
            "The following files were ignored for not being Targa (tga) files:"
        );
        assert!(lines.contains(&String::new()));
        assert!(lines.contains(&"The following arguments were not files!".to_string()));
    }

    #[test]
    fn test_into_sequence_set() {
        let dir = TempDir::new().unwrap();
        let dropped = group_dropped_files(vec![touch(&dir, "a-1.tga"), touch(&dir, "b.tga")]);
        let set = dropped.into_sequence_set("fire");

        assert_eq!(set.material_name(), "fire");
        assert_eq!(set.len(), 2);
        assert_eq!(set.sequences()[0].name(), "a");
        assert!(set.sequences()[1].name().starts_with("Sequence "));
    }

    #[test]
    fn test_nothing_dropped_gives_one_empty_sequence() {
        let set = group_dropped_files(Vec::<PathBuf>::new()).into_sequence_set("fire");
        assert_eq!(set.len(), 1);
        assert!(set.sequences()[0].is_empty());
    }

    #[test]
    fn test_relative_paths_are_made_absolute() {
        let dir = PathBuf::from("target").join(format!("dropped-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("walk-01.tga"), b"").unwrap();

        let dropped = group_dropped_files([dir.join("walk-01.tga")]);
        let _ = std::fs::remove_dir_all(&dir);

        let frame = &dropped.groups[0].1[0];
        assert!(frame.is_absolute());
        assert_eq!(
            *frame,
            std::env::current_dir().unwrap().join(&dir).join("walk-01.tga")
        );
    }
}
