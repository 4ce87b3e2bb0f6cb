//! This module defines the error types used by the `cellmap-grid` crate.

#![warn(missing_docs)]

use thiserror::Error;

use crate::map::Space;

/// Error type for grid operations.
///
/// Callers are expected to branch on the variant: an uninitialized cell is a
/// valid "nothing here yet" state, while an out-of-range query usually points
/// at a logic bug upstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate (after any world to grid conversion) lies outside the grid.
    #[error("query out of grid range: {space} coordinate ({x}, {y})")]
    OutOfRange {
        /// Space the rejected coordinate was expressed in.
        space: Space,
        /// X component of the rejected coordinate.
        x: i64,
        /// Y component of the rejected coordinate.
        y: i64,
    },

    /// Read-only access to a cell that was never created.
    #[error("queried an uninitialized cell at ({x}, {y})")]
    Uninitialized {
        /// Column index of the cell.
        x: usize,
        /// Row index of the cell.
        y: usize,
    },

    /// Error for invalid grid dimensions.
    /// This variant is returned when a cell size or cell count is zero, or the
    /// resulting world extent does not fit in world coordinates.
    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
}

impl GridError {
    /// Returns `true` for [`GridError::OutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, GridError::OutOfRange { .. })
    }

    /// Returns `true` for [`GridError::Uninitialized`].
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, GridError::Uninitialized { .. })
    }
}
