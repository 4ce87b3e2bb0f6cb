//! Grid-related functionality.
//!
//! This module provides the uniform grid itself together with the point
//! types used to address it in grid space and world space.

pub mod grid;
pub mod point_types;

pub use grid::{Grid, GridDimensions, Iter, IterMut};
pub use point_types::{BoundingBox, GridPoint, Space, WorldPoint};
