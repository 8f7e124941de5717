//! Domain models and types for AutoVtex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Stable identifiers** ([`SequenceId`], [`FrameId`]) and the id-indexed
//!   storage behind them ([`IdVec`])
//! - **The sequence model** ([`SequenceSet`], [`Sequence`], [`Frame`])
//! - **Material parameters** ([`MaterialParameters`], [`Shader`])
//! - **Export layout** ([`ExportTarget`], [`ToolLayout`])
//! - **Error types** ([`AutoVtexError`], [`HeaderReadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use autovtex::domain::SequenceSet;
//!
//! let mut set = SequenceSet::new("explosion");
//! let id = set.add_sequence(Some("Boom".to_string()), vec![]);
//! set.append_frames(id, ["boom_01.tga", "boom_02.tga"]).unwrap();
//! set.move_frame(id, 1, 0).unwrap();
//!
//! let order: Vec<_> = set.frames().map(|f| f.path().to_path_buf()).collect();
//! assert_eq!(order[0].to_str(), Some("boom_02.tga"));
//! ```

pub mod arena;
pub mod errors;
pub mod frame;
pub mod ids;
pub mod material;
pub mod result;
pub mod sequence;
pub mod target;

// Re-export commonly used types for convenience
pub use arena::{IdVec, Keyed};
pub use errors::{AutoVtexError, HeaderReadError};
pub use frame::{Dimensions, Frame};
pub use ids::{FrameId, SequenceId};
pub use material::{CustomTexturePath, MaterialParameters, Shader};
pub use result::Result;
pub use sequence::{has_reserved_chars, Sequence, SequenceSet, DEFAULT_MATERIAL_NAME};
pub use target::{ExportTarget, ToolLayout};
