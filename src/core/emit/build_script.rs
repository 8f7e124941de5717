//! Sheet compositor build script
//!
//! One block per sequence, numbered from 0 in set order:
//!
//! ```text
//! sequence 0
//! loop
//! frame C:/art/walk_01.tga 1
//! frame C:/art/walk_02.tga 1
//! sequence 1
//! frame C:/art/idle_01.tga 1
//! ```
//!
//! `loop` appears only for looping sequences. Input is assumed to have passed
//! validation already.

use crate::domain::{Sequence, SequenceSet};

/// Serializes a sequence set into the compositor's script format
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildScriptEmitter;

impl BuildScriptEmitter {
    /// Script lines in order
    pub fn lines(set: &SequenceSet) -> Vec<String> {
        set.sequences()
            .iter()
            .enumerate()
            .flat_map(|(index, sequence)| Self::sequence_lines(index, sequence))
            .collect()
    }

    /// Full script text (lines joined with `\n`)
    pub fn emit(set: &SequenceSet) -> String {
        Self::lines(set).join("\n")
    }

    fn sequence_lines(index: usize, sequence: &Sequence) -> Vec<String> {
        let mut lines = Vec::with_capacity(sequence.len() + 2);
        lines.push(format!("sequence {index}"));
        if sequence.looping() {
            lines.push("loop".to_string());
        }
        lines.extend(
            sequence
                .frames()
                .iter()
                .map(|frame| format!("frame {} 1", frame.path().to_string_lossy())),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn frames(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_walk_scenario() {
        let mut set = SequenceSet::new("walk");
        set.add_sequence(
            Some("Walk".into()),
            frames(&["w1.tga", "w2.tga", "w3.tga", "w4.tga"]),
        );

        assert_eq!(
            BuildScriptEmitter::emit(&set),
            "sequence 0\nloop\nframe w1.tga 1\nframe w2.tga 1\nframe w3.tga 1\nframe w4.tga 1"
        );
    }

    #[test]
    fn test_loop_only_when_looping() {
        let mut set = SequenceSet::new("m");
        let a = set.add_sequence(None, frames(&["a.tga"]));
        set.add_sequence(None, frames(&["b.tga", "c.tga"]));
        set.set_looping(a, false).unwrap();

        let lines = BuildScriptEmitter::lines(&set);
        assert_eq!(
            lines,
            vec![
                "sequence 0",
                "frame a.tga 1",
                "sequence 1",
                "loop",
                "frame b.tga 1",
                "frame c.tga 1",
            ]
        );
    }

    #[test]
    fn test_one_frame_line_per_frame_in_model_order() {
        let mut set = SequenceSet::new("m");
        let id = set.add_sequence(None, frames(&["1.tga", "2.tga", "3.tga"]));
        set.move_frame(id, 2, 0).unwrap();

        let frame_lines: Vec<String> = BuildScriptEmitter::lines(&set)
            .into_iter()
            .filter(|l| l.starts_with("frame "))
            .collect();
        assert_eq!(frame_lines, vec!["frame 3.tga 1", "frame 1.tga 1", "frame 2.tga 1"]);
    }

    #[test]
    fn test_sequence_numbers_are_contiguous_after_removal() {
        let mut set = SequenceSet::new("m");
        set.add_sequence(None, frames(&["a.tga"]));
        let middle = set.add_sequence(None, frames(&["b.tga"]));
        set.add_sequence(None, frames(&["c.tga"]));
        set.remove_sequence(middle).unwrap();

        let headers: Vec<String> = BuildScriptEmitter::lines(&set)
            .into_iter()
            .filter(|l| l.starts_with("sequence "))
            .collect();
        assert_eq!(headers, vec!["sequence 0", "sequence 1"]);
    }
}
