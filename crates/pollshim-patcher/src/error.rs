//! Error types for the glue patcher.

use thiserror::Error;

use crate::marker::MarkerRole;

/// Errors returned by [`crate::patch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// A marker was absent at or after the position of the previous one.
    #[error("{role} marker '{marker}' not found at or after offset {from}")]
    MarkerNotFound {
        /// Which search step failed.
        role: MarkerRole,
        /// The literal that was searched for.
        marker: String,
        /// Byte offset the search started from.
        from: usize,
    },
}

impl PatchError {
    /// Creates a new `MarkerNotFound` error.
    #[must_use]
    pub fn marker_not_found(role: MarkerRole, marker: impl Into<String>, from: usize) -> Self {
        Self::MarkerNotFound {
            role,
            marker: marker.into(),
            from,
        }
    }

    /// Returns the role of the marker that could not be located.
    #[must_use]
    pub const fn role(&self) -> MarkerRole {
        match self {
            Self::MarkerNotFound { role, .. } => *role,
        }
    }
}
