//! 2D Binary Occupancy Grid
//!
//! Fixed-size grid of free/occupied cells filled from projected scan points.
//! One cell per meter, cell `(0, 0)` at the sensor origin; coordinates are
//! truncated toward zero. Marking is additive: cells only ever go from free
//! to occupied.
//!
//! # Example
//!
//! ```rust
//! use reflex_library::algorithms::occupancy_grid::OccupancyGrid;
//! use reflex_library::algorithms::scan_projector::Point2D;
//!
//! let mut grid = OccupancyGrid::new(100, 100);
//!
//! let newly_marked = grid.integrate([Point2D::new(3.7, 12.2), Point2D::new(150.0, 1.0)]);
//!
//! assert_eq!(newly_marked, 1);
//! assert!(grid.is_occupied(3, 12));
//! ```

use super::scan_projector::Point2D;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;

const FREE: u8 = 0;
const OCCUPIED: u8 = 1;

/// 2D Occupancy Grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    grid: Vec<Vec<u8>>, // grid[y][x]: 0 = free, 1 = occupied
}

impl OccupancyGrid {
    /// Create new all-free grid
    ///
    /// # Arguments
    /// * `width` - number of cells along x
    /// * `height` - number of cells along y
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![FREE; width]; height],
        }
    }

    /// Mark every in-bounds point's cell as occupied
    ///
    /// Points with a NaN or infinite coordinate and points outside the grid
    /// are skipped. Returns how many cells went from free to occupied.
    pub fn integrate<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut newly_occupied = 0;
        for point in points {
            if let Some((x, y)) = self.world_to_grid(point.x, point.y) {
                if self.set_occupied(x, y) {
                    newly_occupied += 1;
                }
            }
        }
        newly_occupied
    }

    /// Cell containing `(world_x, world_y)`, truncating toward zero
    ///
    /// `None` for non-finite coordinates and for points outside the grid.
    pub fn world_to_grid(&self, world_x: f64, world_y: f64) -> Option<(usize, usize)> {
        if !world_x.is_finite() || !world_y.is_finite() {
            return None;
        }

        let cell_x = world_x.trunc();
        let cell_y = world_y.trunc();
        if cell_x < 0.0 || cell_y < 0.0 {
            return None;
        }
        if cell_x >= self.width as f64 || cell_y >= self.height as f64 {
            return None;
        }

        Some((cell_x as usize, cell_y as usize))
    }

    /// Set cell as occupied; returns `true` if it was free before
    pub fn set_occupied(&mut self, x: usize, y: usize) -> bool {
        if !self.is_valid(x, y) {
            return false;
        }
        let cell = &mut self.grid[y][x];
        let newly_occupied = *cell == FREE;
        *cell = OCCUPIED;
        newly_occupied
    }

    /// Check if an in-bounds cell is occupied
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.is_valid(x, y) && self.grid[y][x] == OCCUPIED
    }

    /// Check if an in-bounds cell is free
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.is_valid(x, y) && self.grid[y][x] == FREE
    }

    /// Check if grid coordinates are valid
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get grid dimensions as `(width, height)`
    pub fn get_dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn occupied_count(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|&&cell| cell == OCCUPIED).count())
            .sum()
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grid() {
        let grid = OccupancyGrid::default();
        assert_eq!(grid.get_dimensions(), (100, 100));
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.is_free(0, 0));
        assert!(grid.is_free(99, 99));
    }

    #[test]
    fn test_set_occupied() {
        let mut grid = OccupancyGrid::new(10, 10);
        assert!(grid.set_occupied(5, 5));
        assert!(!grid.set_occupied(5, 5));

        assert!(grid.is_occupied(5, 5));
        assert!(!grid.is_free(5, 5));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = OccupancyGrid::new(10, 10);

        assert!(!grid.is_valid(15, 15));
        assert!(!grid.set_occupied(15, 15));
        assert!(!grid.is_occupied(15, 15));
        assert!(!grid.is_free(15, 15));
    }

    #[test]
    fn test_world_to_grid_truncates_toward_zero() {
        let grid = OccupancyGrid::new(100, 100);

        assert_eq!(grid.world_to_grid(1.9, 2.1), Some((1, 2)));
        assert_eq!(grid.world_to_grid(0.0, 0.0), Some((0, 0)));
        // -0.9 truncates to 0, which is inside the grid
        assert_eq!(grid.world_to_grid(-0.9, 0.5), Some((0, 0)));
        assert_eq!(grid.world_to_grid(-1.0, 0.5), None);
        assert_eq!(grid.world_to_grid(99.99, 0.0), Some((99, 0)));
        assert_eq!(grid.world_to_grid(100.0, 0.0), None);
    }

    #[test]
    fn test_world_to_grid_rejects_non_finite() {
        let grid = OccupancyGrid::new(100, 100);

        assert_eq!(grid.world_to_grid(f64::NAN, 1.0), None);
        assert_eq!(grid.world_to_grid(1.0, f64::NAN), None);
        assert_eq!(grid.world_to_grid(f64::INFINITY, 1.0), None);
        assert_eq!(grid.world_to_grid(1.0, f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_integrate_marks_terminal_cells_only() {
        let mut grid = OccupancyGrid::new(20, 20);

        let marked = grid.integrate([Point2D::new(10.5, 0.2)]);

        assert_eq!(marked, 1);
        assert!(grid.is_occupied(10, 0));
        assert!(grid.is_free(5, 0));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_integrate_is_idempotent() {
        let points = vec![
            Point2D::new(1.5, 2.5),
            Point2D::new(7.0, 3.0),
            Point2D::new(1.2, 2.9),
        ];

        let mut once = OccupancyGrid::new(10, 10);
        assert_eq!(once.integrate(points.clone()), 2);

        let mut twice = OccupancyGrid::new(10, 10);
        twice.integrate(points.clone());
        assert_eq!(twice.integrate(points), 0);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_out_of_bounds_points_are_discarded() {
        let mut grid = OccupancyGrid::new(100, 100);
        grid.integrate([Point2D::new(4.0, 4.0)]);
        let before = grid.clone();

        let marked = grid.integrate([
            Point2D::new(150.0, 10.0),
            Point2D::new(10.0, 150.0),
            Point2D::new(-3.0, 10.0),
            Point2D::new(f64::NAN, 10.0),
            Point2D::new(f64::INFINITY, f64::INFINITY),
        ]);

        assert_eq!(marked, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_zero_sized_grid_accepts_nothing() {
        let mut grid = OccupancyGrid::new(0, 0);
        assert_eq!(grid.integrate([Point2D::new(0.0, 0.0)]), 0);
        assert_eq!(grid.occupied_count(), 0);
    }
}
