//! A fixed-extent, uniform-grid spatial index.
//!
//! [`Grid`] maps 2D integer world coordinates onto equally sized cells and
//! stores one lazily created payload per cell. It answers two kinds of
//! queries: which cells intersect a circular region around a point
//! ([`Grid::get_points`]), and what the payload of the cell containing a
//! point is ([`Grid::get_cell`], [`Grid::get_cell_mut`]).
//!
//! The grid is a plain single-threaded structure. Callers that share it
//! between threads must wrap it in their own lock.

#![warn(missing_docs)]

pub mod error;
pub mod map;

pub use error::GridError;
pub use map::{BoundingBox, Grid, GridDimensions, GridPoint, Space, WorldPoint};
