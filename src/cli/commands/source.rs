//! Where a command gets its sequences from

use crate::domain::{SequenceSet, DEFAULT_MATERIAL_NAME};
use crate::project::{group_dropped_files, load_project};
use clap::Args;
use std::path::PathBuf;

/// Sequence source shared by `export` and `validate`
#[derive(Args, Debug, Clone, Default)]
pub struct SequenceSourceArgs {
    /// Project file describing material and sequences
    #[arg(short, long, conflicts_with = "files")]
    pub project: Option<PathBuf>,

    /// Material name (overrides the project's)
    #[arg(short, long)]
    pub material: Option<String>,

    /// Targa frames, grouped into sequences by the file-name prefix before '-'
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl SequenceSourceArgs {
    /// Builds the sequence set, printing warnings for ignored files
    pub fn load(&self) -> crate::domain::Result<SequenceSet> {
        let mut set = match &self.project {
            Some(project) => load_project(project)?,
            None => {
                let dropped = group_dropped_files(self.files.iter().cloned());
                let warnings = dropped.warning_lines();
                if !warnings.is_empty() {
                    println!("⚠️  Some inputs were ignored:");
                    for line in &warnings {
                        println!("   {line}");
                    }
                    println!();
                }
                dropped.into_sequence_set(DEFAULT_MATERIAL_NAME)
            }
        };

        if let Some(material) = &self.material {
            set.set_material_name(material.clone());
        }
        Ok(set)
    }
}
