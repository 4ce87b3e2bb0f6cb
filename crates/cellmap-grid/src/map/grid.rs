//! Uniform grid with lazily created cells.
//!
//! The grid covers a fixed world-space rectangle `[0, width) x [0, height)`
//! split into equally sized cells. A cell only exists once a mutable accessor
//! has touched it; read-only access never creates cells.

#![warn(missing_docs)]

use std::collections::{HashMap, hash_map};
use std::fmt;

use tracing::{debug, trace};

use super::{BoundingBox, GridPoint, Space, WorldPoint};
use crate::error::GridError;

/// The four construction parameters of a [`Grid`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    /// Width of one cell in world units.
    pub cell_width: u32,
    /// Height of one cell in world units.
    pub cell_height: u32,
    /// Number of cells along the x axis.
    pub horizontal_cell_count: usize,
    /// Number of cells along the y axis.
    pub vertical_cell_count: usize,
}

/// A fixed-extent grid mapping integer world coordinates to one payload per cell.
///
/// A cell is initialized iff it has an entry in `cells`, so the payload and its
/// initialization marker can never disagree.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    dims: GridDimensions,
    /// World extent along x (`horizontal_cell_count * cell_width`).
    world_width: i32,
    /// World extent along y (`vertical_cell_count * cell_height`).
    world_height: i32,
    cells: HashMap<GridPoint, T>,
}

impl<T> Grid<T> {
    /// Creates an empty grid.
    ///
    /// # Arguments
    /// * `cell_width` - Width of one cell in world units
    /// * `cell_height` - Height of one cell in world units
    /// * `horizontal_cell_count` - Number of cells along the x axis
    /// * `vertical_cell_count` - Number of cells along the y axis
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The grid, or `InvalidDimensions` if any
    ///   parameter is zero or the world extent overflows `i32`
    pub fn new(
        cell_width: u32,
        cell_height: u32,
        horizontal_cell_count: usize,
        vertical_cell_count: usize,
    ) -> Result<Self, GridError> {
        Self::with_dimensions(GridDimensions {
            cell_width,
            cell_height,
            horizontal_cell_count,
            vertical_cell_count,
        })
    }

    /// Creates an empty grid from a [`GridDimensions`] value.
    pub fn with_dimensions(dims: GridDimensions) -> Result<Self, GridError> {
        if dims.cell_width == 0 || dims.cell_height == 0 {
            return Err(GridError::InvalidDimensions("Cell width and height must be positive"));
        }
        if dims.horizontal_cell_count == 0 || dims.vertical_cell_count == 0 {
            return Err(GridError::InvalidDimensions("Cell counts must be non-zero"));
        }

        let world_width = extent_along(dims.horizontal_cell_count, dims.cell_width).ok_or(
            GridError::InvalidDimensions("Horizontal world extent does not fit in i32"),
        )?;
        let world_height = extent_along(dims.vertical_cell_count, dims.cell_height).ok_or(
            GridError::InvalidDimensions("Vertical world extent does not fit in i32"),
        )?;

        Ok(Grid {
            dims,
            world_width,
            world_height,
            cells: HashMap::new(),
        })
    }

    /// Gets the construction parameters.
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Gets the width of one cell in world units.
    pub fn cell_width(&self) -> u32 {
        self.dims.cell_width
    }

    /// Gets the height of one cell in world units.
    pub fn cell_height(&self) -> u32 {
        self.dims.cell_height
    }

    /// Gets the number of cells along the x axis.
    pub fn horizontal_cell_count(&self) -> usize {
        self.dims.horizontal_cell_count
    }

    /// Gets the number of cells along the y axis.
    pub fn vertical_cell_count(&self) -> usize {
        self.dims.vertical_cell_count
    }

    /// Area of one cell in square world units.
    pub fn cell_area(&self) -> u64 {
        u64::from(self.dims.cell_width) * u64::from(self.dims.cell_height)
    }

    /// Gets the world-space bounds of the grid.
    ///
    /// # Returns
    /// * `(WorldPoint, WorldPoint)` - The inclusive minimum corner and the exclusive maximum corner
    pub fn world_extent(&self) -> (WorldPoint, WorldPoint) {
        (
            WorldPoint::new(0, 0),
            WorldPoint::new(self.world_width, self.world_height),
        )
    }

    /// Number of initialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell has been initialized.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drops every cell, returning the grid to its just-constructed state.
    pub fn clear(&mut self) {
        debug!(cells = self.cells.len(), "clearing grid");
        self.cells.clear();
    }

    /// Converts world coordinates to grid coordinates by integer division.
    ///
    /// Negative world coordinates are rejected along with anything at or past
    /// the world extent.
    pub fn to_grid_space(&self, world_p: WorldPoint) -> Result<GridPoint, GridError> {
        self.grid_from_world(i64::from(world_p.x), i64::from(world_p.y))
    }

    /// Gets the world-space center of a cell.
    ///
    /// This is the point the center check in [`Grid::get_points`] measures from.
    pub fn cell_center(&self, p: GridPoint) -> Result<WorldPoint, GridError> {
        self.check_bounds(p)?;
        let (x, y) = self.cell_center_unchecked(p);
        // In-range cell centers lie inside the world extent, which fits in i32.
        Ok(WorldPoint::new(x as i32, y as i32))
    }

    /// Gets the payload of an initialized cell.
    ///
    /// # Returns
    /// * `Result<&T, GridError>` - The payload, `OutOfRange` if the point is outside the grid,
    ///   or `Uninitialized` if the cell was never created
    pub fn get_cell(&self, p: GridPoint) -> Result<&T, GridError> {
        self.check_bounds(p)?;
        self.cells
            .get(&p)
            .ok_or(GridError::Uninitialized { x: p.x, y: p.y })
    }

    /// Gets the payload of the initialized cell containing a world point.
    pub fn get_cell_at_world(&self, world_p: WorldPoint) -> Result<&T, GridError> {
        let p = self.to_grid_space(world_p)?;
        self.get_cell(p)
    }

    /// Returns `true` if the cell has been created. Never creates it.
    pub fn is_initialized(&self, p: GridPoint) -> bool {
        self.cells.contains_key(&p)
    }

    /// Returns whether the cell containing a world point has been created.
    ///
    /// Fails with `OutOfRange` if the world point does not convert into the grid.
    pub fn is_initialized_at_world(&self, world_p: WorldPoint) -> Result<bool, GridError> {
        Ok(self.is_initialized(self.to_grid_space(world_p)?))
    }

    /// Computes the clamped, inclusive grid-space box around a circular region.
    ///
    /// The lower corner is clamped to the world origin and the upper corner to
    /// the origin of the last cell on each axis. A region lying entirely off
    /// the grid still fails with `OutOfRange`.
    ///
    /// Negative world coordinates are rejected rather than truncated toward
    /// zero, so an upper corner that lands in `(-cell_size, 0)` (e.g. center
    /// `(-3, 25)` with radius 2) is `OutOfRange`, not column or row 0.
    pub fn bounding_box(
        &self,
        center: WorldPoint,
        radius: u32,
    ) -> Result<BoundingBox, GridError> {
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));

        let last_x = i64::from(self.world_width) - i64::from(self.dims.cell_width);
        let last_y = i64::from(self.world_height) - i64::from(self.dims.cell_height);

        let x_min = (cx - r).max(0);
        let y_min = (cy - r).max(0);
        let x_max = (cx + r).min(last_x);
        let y_max = (cy + r).min(last_y);

        Ok(BoundingBox {
            min: self.grid_from_world(x_min, y_min)?,
            max: self.grid_from_world(x_max, y_max)?,
        })
    }

    /// Returns whether a circular region spans more than one cell.
    pub fn covers_multiple_cells(
        &self,
        center: WorldPoint,
        radius: u32,
    ) -> Result<bool, GridError> {
        let bb = self.bounding_box(center, radius)?;
        Ok(bb.min != bb.max)
    }

    /// Collects the cells overlapping a circular world-space region.
    ///
    /// Candidates are the cells from `bb.min` up to, but excluding,
    /// `min(cell_count, bb.max + 1)` on each axis, visited by ascending x and
    /// then ascending y. With `center_check` a cell is kept only if its world
    /// center is strictly closer than `radius` to `center`. If nothing is kept,
    /// the cell containing `center` is returned on its own, or nothing if
    /// `center` lies outside the grid.
    ///
    /// The bounding box uses `radius` truncated to whole world units; the
    /// center check compares against the untruncated `radius²`. Negative and
    /// NaN radii behave like zero.
    ///
    /// # Arguments
    /// * `center` - Center of the region in world coordinates
    /// * `radius` - Radius of the region in world units
    /// * `center_check` - Whether to filter candidates by their cell center
    pub fn get_points(
        &self,
        center: WorldPoint,
        radius: f32,
        center_check: bool,
    ) -> Vec<GridPoint> {
        let mut points = Vec::new();
        let radius = radius.max(0.0);

        // Saturating float to int cast truncates, like the box's integer radius
        match self.bounding_box(center, radius as u32) {
            Ok(bb) => {
                let radius_sq = f64::from(radius) * f64::from(radius);
                let x_end = self.dims.horizontal_cell_count.min(bb.max.x + 1);
                let y_end = self.dims.vertical_cell_count.min(bb.max.y + 1);

                for x in bb.min.x..x_end {
                    for y in bb.min.y..y_end {
                        let p = GridPoint::new(x, y);
                        if !center_check
                            || self.squared_distance_to_center(p, center) < radius_sq
                        {
                            points.push(p);
                        }
                    }
                }
            }
            Err(e) => debug!(%center, radius, error = %e, "query region outside grid"),
        }

        // Too small to reach any cell center: fall back to the containing cell
        if points.is_empty() {
            if let Ok(p) = self.to_grid_space(center) {
                debug!(%center, radius, cell = %p, "no cell matched, using containing cell");
                points.push(p);
            }
        }

        points
    }

    /// Iterates over the initialized cells.
    ///
    /// The order is unspecified but stays the same until the grid is mutated.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.cells.iter(),
        }
    }

    /// Iterates mutably over the initialized cells.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.cells.iter_mut(),
        }
    }

    fn check_bounds(&self, p: GridPoint) -> Result<(), GridError> {
        if p.x < self.dims.horizontal_cell_count && p.y < self.dims.vertical_cell_count {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                space: Space::Grid,
                x: index_to_i64(p.x),
                y: index_to_i64(p.y),
            })
        }
    }

    fn grid_from_world(&self, x: i64, y: i64) -> Result<GridPoint, GridError> {
        let out_of_range = GridError::OutOfRange {
            space: Space::World,
            x,
            y,
        };
        if x < 0 || y < 0 {
            return Err(out_of_range);
        }

        let grid_x = x / i64::from(self.dims.cell_width);
        let grid_y = y / i64::from(self.dims.cell_height);
        if grid_x >= index_to_i64(self.dims.horizontal_cell_count)
            || grid_y >= index_to_i64(self.dims.vertical_cell_count)
        {
            return Err(out_of_range);
        }

        Ok(GridPoint::new(grid_x as usize, grid_y as usize))
    }

    fn cell_center_unchecked(&self, p: GridPoint) -> (i64, i64) {
        let cw = i64::from(self.dims.cell_width);
        let ch = i64::from(self.dims.cell_height);
        (
            index_to_i64(p.x) * cw + cw / 2,
            index_to_i64(p.y) * ch + ch / 2,
        )
    }

    fn squared_distance_to_center(&self, p: GridPoint, world_p: WorldPoint) -> f64 {
        let (x, y) = self.cell_center_unchecked(p);
        let dx = (x - i64::from(world_p.x)) as f64;
        let dy = (y - i64::from(world_p.y)) as f64;
        dx * dx + dy * dy
    }
}

impl<T: Default> Grid<T> {
    /// Gets a mutable reference to a cell's payload, creating it with
    /// `T::default()` on first access.
    ///
    /// # Returns
    /// * `Result<&mut T, GridError>` - The payload or `OutOfRange` if the point is outside the grid
    pub fn get_cell_mut(&mut self, p: GridPoint) -> Result<&mut T, GridError> {
        self.check_bounds(p)?;
        Ok(self.cells.entry(p).or_insert_with(|| {
            trace!(x = p.x, y = p.y, "initializing cell");
            T::default()
        }))
    }

    /// Gets a mutable reference to the payload of the cell containing a world
    /// point, creating the cell on first access.
    pub fn get_cell_at_world_mut(&mut self, world_p: WorldPoint) -> Result<&mut T, GridError> {
        let p = self.to_grid_space(world_p)?;
        self.get_cell_mut(p)
    }
}

/// Iterator over `(GridPoint, &T)` for every initialized cell.
pub struct Iter<'a, T> {
    inner: hash_map::Iter<'a, GridPoint, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (GridPoint, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(p, value)| (*p, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over `(GridPoint, &mut T)` for every initialized cell.
pub struct IterMut<'a, T> {
    inner: hash_map::IterMut<'a, GridPoint, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (GridPoint, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(p, value)| (*p, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (GridPoint, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Grid<T> {
    type Item = (GridPoint, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid ({}x{} cells of {}x{}, {} initialized)",
            self.dims.horizontal_cell_count,
            self.dims.vertical_cell_count,
            self.dims.cell_width,
            self.dims.cell_height,
            self.cells.len()
        )?;

        for y in 0..self.dims.vertical_cell_count {
            for x in 0..self.dims.horizontal_cell_count {
                let mark = if self.is_initialized(GridPoint::new(x, y)) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn extent_along(count: usize, cell_size: u32) -> Option<i32> {
    let count = i32::try_from(count).ok()?;
    let cell_size = i32::try_from(cell_size).ok()?;
    count.checked_mul(cell_size)
}

fn index_to_i64(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 cells of 10x10 world units, world extent 50x50.
    fn grid() -> Grid<u32> {
        Grid::new(10, 10, 5, 5).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = grid();
        assert_eq!(grid.cell_width(), 10);
        assert_eq!(grid.cell_height(), 10);
        assert_eq!(grid.horizontal_cell_count(), 5);
        assert_eq!(grid.vertical_cell_count(), 5);
        assert_eq!(grid.cell_area(), 100);
        assert_eq!(grid.len(), 0);
        assert!(grid.is_empty());
        assert_eq!(
            grid.world_extent(),
            (WorldPoint::new(0, 0), WorldPoint::new(50, 50))
        );
    }

    #[test]
    fn test_invalid_creation() {
        assert!(matches!(
            Grid::<u32>::new(0, 10, 5, 5),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::<u32>::new(10, 0, 5, 5),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::<u32>::new(10, 10, 0, 5),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::<u32>::new(10, 10, 5, 0),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::<u32>::new(u32::MAX, 1, 2, 1),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::<u32>::new(1 << 16, 1 << 16, 1 << 15, 1),
            Err(GridError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_lazy_initialization() {
        let mut grid = grid();
        let p = GridPoint::new(2, 3);

        assert!(!grid.is_initialized(p));
        assert_eq!(*grid.get_cell_mut(p).unwrap(), 0);
        assert!(grid.is_initialized(p));
        assert_eq!(grid.len(), 1);

        *grid.get_cell_mut(p).unwrap() += 7;
        assert_eq!(*grid.get_cell(p).unwrap(), 7);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_read_only_access_does_not_create() {
        let grid = grid();
        let p = GridPoint::new(1, 1);
        assert_eq!(
            grid.get_cell(p),
            Err(GridError::Uninitialized { x: 1, y: 1 })
        );
        assert!(!grid.is_initialized(p));
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = grid();
        assert_eq!(
            grid.get_cell_mut(GridPoint::new(5, 0)),
            Err(GridError::OutOfRange {
                space: Space::Grid,
                x: 5,
                y: 0
            })
        );
        assert!(matches!(
            grid.get_cell(GridPoint::new(0, 5)),
            Err(GridError::OutOfRange { .. })
        ));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_world_access() {
        let mut grid = grid();
        *grid.get_cell_at_world_mut(WorldPoint::new(29, 11)).unwrap() = 4;

        assert!(grid.is_initialized(GridPoint::new(2, 1)));
        assert_eq!(*grid.get_cell_at_world(WorldPoint::new(20, 19)).unwrap(), 4);
        assert_eq!(grid.is_initialized_at_world(WorldPoint::new(25, 15)), Ok(true));
        assert_eq!(grid.is_initialized_at_world(WorldPoint::new(35, 15)), Ok(false));
        assert!(matches!(
            grid.get_cell_at_world(WorldPoint::new(0, 0)),
            Err(GridError::Uninitialized { x: 0, y: 0 })
        ));
    }

    #[test]
    fn test_world_conversion_bounds() {
        let grid = grid();
        assert_eq!(
            grid.to_grid_space(WorldPoint::new(49, 0)),
            Ok(GridPoint::new(4, 0))
        );
        assert_eq!(
            grid.to_grid_space(WorldPoint::new(50, 0)),
            Err(GridError::OutOfRange {
                space: Space::World,
                x: 50,
                y: 0
            })
        );
        // -5 / 10 truncates to 0, but negative world points are still rejected
        assert!(matches!(
            grid.to_grid_space(WorldPoint::new(-5, 5)),
            Err(GridError::OutOfRange { space: Space::World, x: -5, y: 5 })
        ));
        assert!(matches!(
            grid.is_initialized_at_world(WorldPoint::new(5, 50)),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_cell_center() {
        let grid: Grid<u8> = Grid::new(10, 4, 5, 5).unwrap();
        assert_eq!(grid.cell_center(GridPoint::new(0, 0)), Ok(WorldPoint::new(5, 2)));
        assert_eq!(grid.cell_center(GridPoint::new(3, 2)), Ok(WorldPoint::new(35, 10)));
        assert!(grid.cell_center(GridPoint::new(5, 0)).is_err());

        // Odd cell sizes round the center down
        let grid: Grid<u8> = Grid::new(3, 3, 2, 2).unwrap();
        assert_eq!(grid.cell_center(GridPoint::new(1, 1)), Ok(WorldPoint::new(4, 4)));
    }

    #[test]
    fn test_bounding_box_clamping() {
        let grid = grid();

        let bb = grid.bounding_box(WorldPoint::new(25, 25), 5).unwrap();
        assert_eq!(bb.min, GridPoint::new(2, 2));
        assert_eq!(bb.max, GridPoint::new(3, 3));

        let bb = grid.bounding_box(WorldPoint::new(3, 48), 100).unwrap();
        assert_eq!(bb.min, GridPoint::new(0, 0));
        assert_eq!(bb.max, GridPoint::new(4, 4));

        // Entirely left of the grid
        assert!(matches!(
            grid.bounding_box(WorldPoint::new(-100, 10), 5),
            Err(GridError::OutOfRange { .. })
        ));
        // Entirely right of the grid
        assert!(matches!(
            grid.bounding_box(WorldPoint::new(80, 10), 5),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_covers_multiple_cells() {
        let grid = grid();
        assert_eq!(grid.covers_multiple_cells(WorldPoint::new(25, 25), 0), Ok(false));
        assert_eq!(grid.covers_multiple_cells(WorldPoint::new(25, 25), 4), Ok(false));
        assert_eq!(grid.covers_multiple_cells(WorldPoint::new(25, 25), 5), Ok(true));
        assert_eq!(grid.covers_multiple_cells(WorldPoint::new(49, 49), 0), Ok(false));
        // Clamped to the last cell on both axes
        assert_eq!(grid.covers_multiple_cells(WorldPoint::new(45, 45), 4), Ok(false));
    }

    #[test]
    fn test_get_points_without_center_check() {
        let grid = grid();
        let points = grid.get_points(WorldPoint::new(25, 25), 5.0, false);
        assert!(points.contains(&GridPoint::new(2, 2)));
        assert!(!points.contains(&GridPoint::new(0, 0)));
    }

    #[test]
    fn test_get_points_iterates_through_inclusive_max() {
        let grid = grid();

        // The box reaches x = y = 30, the first column/row of cell 3, so cell 3 is included
        let points = grid.get_points(WorldPoint::new(25, 25), 5.0, false);
        assert_eq!(
            points,
            vec![
                GridPoint::new(2, 2),
                GridPoint::new(2, 3),
                GridPoint::new(3, 2),
                GridPoint::new(3, 3),
            ]
        );

        // At the far edge the upper bound is capped by the cell count
        let points = grid.get_points(WorldPoint::new(45, 45), 10.0, false);
        assert_eq!(
            points,
            vec![
                GridPoint::new(3, 3),
                GridPoint::new(3, 4),
                GridPoint::new(4, 3),
                GridPoint::new(4, 4),
            ]
        );
    }

    #[test]
    fn test_get_points_center_check() {
        let grid = grid();

        // Neighbour centers are exactly 10 away, which is not strictly inside
        assert_eq!(
            grid.get_points(WorldPoint::new(25, 25), 10.0, true),
            vec![GridPoint::new(2, 2)]
        );

        let points = grid.get_points(WorldPoint::new(25, 25), 15.0, true);
        assert_eq!(points.len(), 9);
        assert!(points.contains(&GridPoint::new(1, 1)));
        assert!(points.contains(&GridPoint::new(3, 3)));
        assert!(!points.contains(&GridPoint::new(4, 2)));
    }

    #[test]
    fn test_get_points_falls_back_to_containing_cell() {
        let grid = grid();
        // Cell (0, 0) has its center at (5, 5): 50 >= 1, so only the fallback applies
        assert_eq!(
            grid.get_points(WorldPoint::new(0, 0), 1.0, true),
            vec![GridPoint::new(0, 0)]
        );
        assert_eq!(
            grid.get_points(WorldPoint::new(41, 12), 0.0, true),
            vec![GridPoint::new(4, 1)]
        );
    }

    #[test]
    fn test_get_points_fractional_radius() {
        let grid = grid();

        // (0, 0) and (1, 0) both have centers at distance² 50 from (10, 0): 50 < 56.25
        assert_eq!(
            grid.get_points(WorldPoint::new(10, 0), 7.5, true),
            vec![GridPoint::new(0, 0), GridPoint::new(1, 0)]
        );
        // 50 >= 49, only the containing cell remains
        assert_eq!(
            grid.get_points(WorldPoint::new(10, 0), 7.0, true),
            vec![GridPoint::new(1, 0)]
        );

        // From (12, 8): (1, 0) is at 18, (0, 0) and (1, 1) at 58
        assert_eq!(
            grid.get_points(WorldPoint::new(12, 8), 7.5, true),
            vec![GridPoint::new(1, 0)]
        );
        assert_eq!(
            grid.get_points(WorldPoint::new(12, 8), 8.0, true),
            vec![
                GridPoint::new(0, 0),
                GridPoint::new(1, 0),
                GridPoint::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_get_points_negative_radius_acts_as_zero() {
        let grid = grid();
        assert_eq!(
            grid.get_points(WorldPoint::new(25, 25), -5.0, true),
            vec![GridPoint::new(2, 2)]
        );
        assert_eq!(
            grid.get_points(WorldPoint::new(25, 25), f32::NAN, false),
            vec![GridPoint::new(2, 2)]
        );
    }

    #[test]
    fn test_bounding_box_rejects_upper_corner_left_of_origin() {
        let grid = grid();
        // x_max = -1 would truncate to column 0, but is rejected as negative
        assert!(matches!(
            grid.bounding_box(WorldPoint::new(-3, 25), 2),
            Err(GridError::OutOfRange { space: Space::World, x: -1, .. })
        ));
        assert!(grid.get_points(WorldPoint::new(-3, 25), 2.0, false).is_empty());
    }

    #[test]
    fn test_get_points_outside_grid_is_empty() {
        let grid = grid();
        assert!(grid.get_points(WorldPoint::new(-100, -100), 5.0, false).is_empty());
        assert!(grid.get_points(WorldPoint::new(60, 25), 5.0, true).is_empty());
    }

    #[test]
    fn test_get_points_partially_outside() {
        let grid = grid();
        // Center off the right edge, region still reaching column 4
        let points = grid.get_points(WorldPoint::new(60, 25), 15.0, false);
        assert_eq!(
            points,
            vec![
                GridPoint::new(4, 1),
                GridPoint::new(4, 2),
                GridPoint::new(4, 3),
                GridPoint::new(4, 4),
            ]
        );
    }

    #[test]
    fn test_get_points_does_not_create_cells() {
        let grid = grid();
        let _ = grid.get_points(WorldPoint::new(25, 25), 30.0, false);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_iteration_and_clear() {
        let mut grid = grid();
        for (i, x) in [0usize, 2, 4].into_iter().enumerate() {
            *grid.get_cell_mut(GridPoint::new(x, x)).unwrap() = i as u32 + 1;
        }

        let mut seen: Vec<(GridPoint, u32)> = grid.iter().map(|(p, v)| (p, *v)).collect();
        seen.sort_by_key(|(p, _)| (p.x, p.y));
        assert_eq!(
            seen,
            vec![
                (GridPoint::new(0, 0), 1),
                (GridPoint::new(2, 2), 2),
                (GridPoint::new(4, 4), 3),
            ]
        );
        assert_eq!(grid.iter().len(), 3);

        for (_, value) in &mut grid {
            *value *= 10;
        }
        assert_eq!(*grid.get_cell(GridPoint::new(2, 2)).unwrap(), 20);

        grid.clear();
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.iter().count(), 0);
        assert!(grid.get_cell(GridPoint::new(2, 2)).unwrap_err().is_uninitialized());
        assert_eq!(grid.horizontal_cell_count(), 5);
        assert_eq!(grid.cell_width(), 10);
    }

    #[test]
    fn test_display() {
        let mut grid: Grid<u8> = Grid::new(10, 10, 3, 2).unwrap();
        grid.get_cell_mut(GridPoint::new(1, 1)).unwrap();

        let display_str = format!("{}", grid);
        assert!(display_str.contains("Grid (3x2 cells of 10x10, 1 initialized)"));
        assert!(display_str.contains(". . . \n. # . \n"));
    }
}
