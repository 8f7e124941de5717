//! Sequence sources
//!
//! A [`SequenceSet`] can come from a project file on disk or from a list of
//! dropped image paths ([`dropped`]).
//!
//! ```toml
//! material = "fire"
//!
//! [[sequence]]
//! name = "Burn"
//! frames = ["frames/burn-01.tga", "frames/burn-02.tga"]
//!
//! [[sequence]]
//! name = "Fade"
//! looping = false
//! frames = ["frames/fade-01.tga"]
//! ```

pub mod dropped;

pub use dropped::{group_dropped_files, DroppedFiles};

use crate::domain::{AutoVtexError, Result, SequenceSet, DEFAULT_MATERIAL_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Material name
    #[serde(default = "default_material")]
    pub material: String,

    /// Sequences in export order
    #[serde(default, rename = "sequence")]
    pub sequences: Vec<ProjectSequence>,
}

/// One `[[sequence]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSequence {
    /// Display name (placeholder when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether playback loops
    #[serde(default = "default_true")]
    pub looping: bool,

    /// Frame image paths, relative to the project file or absolute
    #[serde(default)]
    pub frames: Vec<PathBuf>,
}

impl ProjectFile {
    /// Parses project text
    ///
    /// # Errors
    ///
    /// Returns [`AutoVtexError::Project`] for malformed TOML
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| AutoVtexError::Project(format!("Failed to parse project: {e}")))
    }

    /// Builds the sequence set, resolving relative frame paths against `base_dir`
    pub fn into_sequence_set(self, base_dir: &Path) -> Result<SequenceSet> {
        let mut set = SequenceSet::new(self.material);
        for sequence in self.sequences {
            let frames = sequence
                .frames
                .into_iter()
                .map(|frame| {
                    if frame.is_absolute() {
                        frame
                    } else {
                        base_dir.join(frame)
                    }
                })
                .collect();
            let id = set.add_sequence(sequence.name, frames);
            set.set_looping(id, sequence.looping)?;
        }
        Ok(set)
    }

    /// Example project referencing `frames/` next to the file
    pub fn sample(material: &str) -> Self {
        Self {
            material: material.to_string(),
            sequences: vec![
                ProjectSequence {
                    name: Some("Burn".to_string()),
                    looping: true,
                    frames: (1..=4)
                        .map(|i| PathBuf::from(format!("frames/burn-{i:02}.tga")))
                        .collect(),
                },
                ProjectSequence {
                    name: Some("Fade".to_string()),
                    looping: false,
                    frames: vec![PathBuf::from("frames/fade-01.tga")],
                },
            ],
        }
    }

    /// Serializes the project as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AutoVtexError::Serialization(format!("Failed to write project: {e}")))
    }
}

/// Loads a project file into a sequence set
///
/// # Errors
///
/// Returns [`AutoVtexError::Project`] if the file cannot be read or parsed
pub fn load_project(path: impl AsRef<Path>) -> Result<SequenceSet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        AutoVtexError::Project(format!("Failed to read project {}: {}", path.display(), e))
    })?;

    let project = ProjectFile::parse(&contents)?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let base_dir = std::path::absolute(parent).map_err(|e| {
        AutoVtexError::Project(format!("Cannot resolve {}: {}", parent.display(), e))
    })?;
    let set = project.into_sequence_set(&base_dir)?;

    tracing::info!(
        path = %path.display(),
        material = %set.material_name(),
        sequences = set.len(),
        frames = set.frame_count(),
        "Project loaded"
    );
    Ok(set)
}

fn default_material() -> String {
    DEFAULT_MATERIAL_NAME.to_string()
}

fn default_true() -> bool {
    true
}
