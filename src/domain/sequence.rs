//! Sequence model
//!
//! A [`SequenceSet`] is everything one export job packs into a single sheet:
//! the material name and an ordered list of [`Sequence`]s, each an ordered list
//! of [`Frame`]s. List order is playback order and packing order, so the only
//! way to change it is through the drag/move operations here.

use super::arena::{IdVec, Keyed};
use super::errors::AutoVtexError;
use super::frame::Frame;
use super::ids::{FrameId, SequenceId};
use super::result::Result;
use std::path::PathBuf;

/// Display name shown for a sequence renamed to an empty string
pub const EMPTY_NAME_PLACEHOLDER: &str = "<empty>";

/// Material name used when nothing else was given
pub const DEFAULT_MATERIAL_NAME: &str = "Unnamed_material";

/// Characters that may not appear in material or folder names
pub const RESERVED_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns true if `name` contains a path separator or reserved character
pub fn has_reserved_chars(name: &str) -> bool {
    name.contains(RESERVED_NAME_CHARS)
}

/// An ordered, named group of frames sharing a looping flag
#[derive(Debug, Clone)]
pub struct Sequence {
    id: SequenceId,
    name: String,
    looping: bool,
    frames: IdVec<Frame>,
}

impl Sequence {
    /// Creates an empty looping sequence
    ///
    /// Without a name the sequence gets a `Sequence <id>` placeholder.
    pub fn new(name: Option<String>) -> Self {
        let id = SequenceId::new();
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => format!("Sequence {id}"),
        };
        Self {
            id,
            name,
            looping: true,
            frames: IdVec::new(),
        }
    }

    /// Stable identifier
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether playback wraps around
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Frames in packing order
    pub fn frames(&self) -> &[Frame] {
        self.frames.as_slice()
    }

    /// Looks a frame up by id
    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id)
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the sequence has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn drag_frame(&mut self, from: usize, to: usize) -> Result<usize> {
        if !self.frames.swap(from, to) {
            return Err(AutoVtexError::Model(format!(
                "Frame index out of range: {from} -> {to} (sequence '{}' has {} frames)",
                self.name,
                self.frames.len()
            )));
        }
        Ok(to)
    }
}

impl Keyed for Sequence {
    type Key = SequenceId;

    fn key(&self) -> SequenceId {
        self.id
    }
}

/// All sequences of one export job plus the target material name
///
/// # Examples
///
/// ```
/// use autovtex::domain::SequenceSet;
///
/// let mut set = SequenceSet::new("fire");
/// let walk = set.add_sequence(Some("Walk".to_string()), vec!["a.tga".into(), "b.tga".into()]);
/// set.set_looping(walk, false).unwrap();
///
/// let seq = set.sequence(walk).unwrap();
/// assert_eq!(seq.name(), "Walk");
/// assert_eq!(seq.frames().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSet {
    material_name: String,
    sequences: IdVec<Sequence>,
}

impl Default for SequenceSet {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL_NAME)
    }
}

impl SequenceSet {
    /// Creates an empty set for `material_name`
    pub fn new(material_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            sequences: IdVec::new(),
        }
    }

    /// Target material name
    pub fn material_name(&self) -> &str {
        &self.material_name
    }

    /// Changes the target material name
    pub fn set_material_name(&mut self, name: impl Into<String>) {
        self.material_name = name.into();
    }

    /// Sequences in export order
    pub fn sequences(&self) -> &[Sequence] {
        self.sequences.as_slice()
    }

    /// Looks a sequence up by id
    pub fn sequence(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(id)
    }

    /// Position of a sequence in export order
    pub fn position(&self, id: SequenceId) -> Option<usize> {
        self.sequences.position(id)
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// True when there are no sequences
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Total number of frames across all sequences
    pub fn frame_count(&self) -> usize {
        self.sequences.iter().map(Sequence::len).sum()
    }

    /// Iterates every frame in packing order
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.sequences.iter().flat_map(|s| s.frames().iter())
    }

    /// Appends a new sequence and returns its id
    pub fn add_sequence(&mut self, name: Option<String>, frames: Vec<PathBuf>) -> SequenceId {
        let mut sequence = Sequence::new(name);
        for path in frames {
            sequence.frames.push(Frame::new(path));
        }
        tracing::debug!(
            sequence_id = %sequence.id,
            name = %sequence.name,
            frames = sequence.len(),
            "Sequence added"
        );
        self.sequences.push(sequence)
    }

    /// Removes a sequence and returns it
    pub fn remove_sequence(&mut self, id: SequenceId) -> Result<Sequence> {
        self.sequences
            .remove(id)
            .ok_or_else(|| unknown_sequence(id))
    }

    /// Renames a sequence; an empty name shows as `<empty>`
    pub fn rename_sequence(&mut self, id: SequenceId, name: &str) -> Result<()> {
        let sequence = self.sequence_mut(id)?;
        sequence.name = if name.is_empty() {
            EMPTY_NAME_PLACEHOLDER.to_string()
        } else {
            name.to_string()
        };
        Ok(())
    }

    /// Sets the looping flag of a sequence
    pub fn set_looping(&mut self, id: SequenceId, looping: bool) -> Result<()> {
        self.sequence_mut(id)?.looping = looping;
        Ok(())
    }

    /// Appends frames to the end of a sequence, returning their ids
    pub fn append_frames<I, P>(&mut self, id: SequenceId, paths: I) -> Result<Vec<FrameId>>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let sequence = self.sequence_mut(id)?;
        Ok(paths
            .into_iter()
            .map(|p| sequence.frames.push(Frame::new(p)))
            .collect())
    }

    /// Removes one frame from a sequence
    pub fn remove_frame(&mut self, sequence_id: SequenceId, frame_id: FrameId) -> Result<Frame> {
        let sequence = self.sequence_mut(sequence_id)?;
        sequence.frames.remove(frame_id).ok_or_else(|| {
            AutoVtexError::Model(format!(
                "Unknown frame {frame_id} in sequence '{}'",
                sequence.name
            ))
        })
    }

    /// Handles one drag event on a frame list
    ///
    /// Swaps the dragged frame at `from` with exactly the frame at `to` and
    /// returns the dragged frame's new index. A drag gesture is a series of
    /// these events, one per row the pointer crosses.
    pub fn drag_frame(&mut self, sequence_id: SequenceId, from: usize, to: usize) -> Result<usize> {
        self.sequence_mut(sequence_id)?.drag_frame(from, to)
    }

    /// Moves a frame from `from` to `to` through adjacent drag steps
    pub fn move_frame(&mut self, sequence_id: SequenceId, from: usize, to: usize) -> Result<()> {
        let sequence = self.sequence_mut(sequence_id)?;
        let len = sequence.len();
        if from >= len || to >= len {
            return Err(AutoVtexError::Model(format!(
                "Frame index out of range: {from} -> {to} (sequence '{}' has {len} frames)",
                sequence.name
            )));
        }
        let mut current = from;
        while current != to {
            let next = if to > current { current + 1 } else { current - 1 };
            current = sequence.drag_frame(current, next)?;
        }
        Ok(())
    }

    /// Handles one drag event on the sequence list
    pub fn drag_sequence(&mut self, from: usize, to: usize) -> Result<usize> {
        if !self.sequences.swap(from, to) {
            return Err(AutoVtexError::Model(format!(
                "Sequence index out of range: {from} -> {to} (set has {} sequences)",
                self.sequences.len()
            )));
        }
        Ok(to)
    }

    /// Moves a sequence from `from` to `to` through adjacent drag steps
    pub fn move_sequence(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.sequences.len();
        if from >= len || to >= len {
            return Err(AutoVtexError::Model(format!(
                "Sequence index out of range: {from} -> {to} (set has {len} sequences)"
            )));
        }
        let mut current = from;
        while current != to {
            let next = if to > current { current + 1 } else { current - 1 };
            current = self.drag_sequence(current, next)?;
        }
        Ok(())
    }

    fn sequence_mut(&mut self, id: SequenceId) -> Result<&mut Sequence> {
        self.sequences.get_mut(id).ok_or_else(|| unknown_sequence(id))
    }
}

fn unknown_sequence(id: SequenceId) -> AutoVtexError {
    AutoVtexError::Model(format!("Unknown sequence {id}"))
}
