//! Atlas capacity check
//!
//! Mirrors the sheet compositor's page layout: square cells go left to right,
//! wrap to the next row when the next cell would cross the right edge, and the
//! sheet overflows when a row would start past the bottom edge. No rotation,
//! padding or reordering. If the compositor ever changes its layout, this has
//! to change with it.

/// Maximum composite extent in both axes
pub const MAX_ATLAS_EXTENT: u32 = 2048;

/// Shelf-packing feasibility check for uniform square cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayoutChecker {
    max_extent: u32,
}

impl Default for AtlasLayoutChecker {
    fn default() -> Self {
        Self::new(MAX_ATLAS_EXTENT)
    }
}

impl AtlasLayoutChecker {
    /// Creates a checker for a square canvas of `max_extent` pixels
    pub fn new(max_extent: u32) -> Self {
        Self { max_extent }
    }

    /// Canvas extent in pixels
    pub fn max_extent(&self) -> u32 {
        self.max_extent
    }

    /// Returns true if `count` cells of `cell` pixels fit on the canvas
    ///
    /// Places the cells one at a time so the first overflowing row is found
    /// exactly where the compositor would find it.
    pub fn fits(&self, cell: u32, count: usize) -> bool {
        self.first_overflow(cell, count).is_none()
    }

    /// Index of the first cell that does not fit, if any
    pub fn first_overflow(&self, cell: u32, count: usize) -> Option<usize> {
        let extent = u64::from(self.max_extent);
        let size = u64::from(cell);
        let (mut x, mut y) = (0u64, 0u64);

        for i in 0..count {
            if x + size > extent {
                x = 0;
                y += size;
            }
            if y + size > extent {
                tracing::debug!(cell, count, overflow_at = i, "Atlas capacity exceeded");
                return Some(i);
            }
            x += size;
        }
        None
    }
}
