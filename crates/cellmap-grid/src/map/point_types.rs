use std::fmt;

/// Represents a point in grid coordinates (cell indices).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPoint {
    /// The x-coordinate (column index) in the grid.
    pub x: usize,
    /// The y-coordinate (row index) in the grid.
    pub y: usize,
}

impl GridPoint {
    /// Creates a new `GridPoint`.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents a point in world coordinates (application units, e.g. pixels).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    /// The x-coordinate in world units.
    pub x: i32,
    /// The y-coordinate in world units.
    pub y: i32,
}

impl WorldPoint {
    /// Creates a new `WorldPoint`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The coordinate space a point is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Space {
    /// Cell indices.
    Grid,
    /// World units, divided down by the cell size to reach grid space.
    World,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Grid => write!(f, "grid"),
            Space::World => write!(f, "world"),
        }
    }
}

/// Inclusive grid-space rectangle covering a circular query region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoundingBox {
    /// Lowest column and row touched by the region.
    pub min: GridPoint,
    /// Highest column and row touched by the region (inclusive).
    pub max: GridPoint,
}
