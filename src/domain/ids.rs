//! Stable identifiers for model entities
//!
//! Sequences and frames receive an opaque id when they are created. Front ends
//! keep these ids next to their rows and look entities up through the id, so a
//! reorder or removal never invalidates what a row points at.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Sequence`](crate::domain::Sequence)
    ///
    /// # Examples
    ///
    /// ```
    /// use autovtex::domain::ids::SequenceId;
    /// use std::str::FromStr;
    ///
    /// let id = SequenceId::new();
    /// let parsed = SequenceId::from_str(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    SequenceId,
    "sequence id"
);

entity_id!(
    /// Identifier of a [`Frame`](crate::domain::Frame)
    FrameId,
    "frame id"
);
