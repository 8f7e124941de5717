//! Frame domain model
//!
//! A frame is one image file that becomes one cell of the composite sheet.

use super::arena::Keyed;
use super::errors::HeaderReadError;
use super::ids::FrameId;
use serde::Serialize;
use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Pixel dimensions read from an image header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Dimensions {
    /// Creates a new dimension pair
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when width equals height
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// True when both sides are positive
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Reference to an image file inside a sequence
///
/// Dimensions are resolved lazily the first time they are asked for and
/// cached afterwards; failed reads are not cached.
#[derive(Debug, Clone)]
pub struct Frame {
    id: FrameId,
    path: PathBuf,
    dimensions: OnceCell<Dimensions>,
}

impl Frame {
    /// Creates a frame for `path` with a fresh id
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            id: FrameId::new(),
            path: path.into(),
            dimensions: OnceCell::new(),
        }
    }

    /// Stable identifier
    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Image path as given when the frame was added
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the image file currently exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Cached dimensions, if they were resolved already
    pub fn cached_dimensions(&self) -> Option<Dimensions> {
        self.dimensions.get().copied()
    }

    /// Resolves dimensions with `read`, caching a successful result
    pub fn dimensions_with<F>(&self, read: F) -> Result<Dimensions, HeaderReadError>
    where
        F: FnOnce(&Path) -> Result<Dimensions, HeaderReadError>,
    {
        if let Some(dimensions) = self.dimensions.get() {
            return Ok(*dimensions);
        }
        let dimensions = read(&self.path)?;
        Ok(*self.dimensions.get_or_init(|| dimensions))
    }
}

impl Keyed for Frame {
    type Key = FrameId;

    fn key(&self) -> FrameId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dimensions_display_and_shape() {
        let d = Dimensions::new(100, 120);
        assert_eq!(d.to_string(), "100x120");
        assert!(!d.is_square());
        assert!(Dimensions::new(64, 64).is_square());
        assert!(!Dimensions::new(0, 0).is_positive());
    }

    #[test]
    fn test_dimensions_are_cached_after_first_read() {
        let frame = Frame::new("walk_01.tga");
        let calls = Cell::new(0);
        let read = |_: &Path| -> Result<Dimensions, HeaderReadError> {
            calls.set(calls.get() + 1);
            Ok(Dimensions::new(256, 256))
        };

        assert_eq!(frame.dimensions_with(read).unwrap(), Dimensions::new(256, 256));
        assert_eq!(frame.dimensions_with(read).unwrap(), Dimensions::new(256, 256));
        assert_eq!(calls.get(), 1);
        assert_eq!(frame.cached_dimensions(), Some(Dimensions::new(256, 256)));
    }

    #[test]
    fn test_failed_read_is_not_cached() {
        let frame = Frame::new("broken.tga");
        let result = frame.dimensions_with(|p| {
            Err(HeaderReadError::Truncated {
                path: p.to_path_buf(),
                expected: 18,
                actual: 3,
            })
        });
        assert!(result.is_err());
        assert!(frame.cached_dimensions().is_none());
    }
}
