//! Polar-to-Cartesian Scan Projection
//!
//! Converts each reading of a [`LaserScan`] into a point in the sensor frame.
//!
//! # Example
//!
//! ```rust
//! use reflex_library::algorithms::scan_projector::ScanProjector;
//! use reflex_library::messages::LaserScan;
//!
//! let scan = LaserScan::new(vec![2.0], 0.0, 0.0);
//! let points: Vec<_> = ScanProjector::project(&scan).collect();
//!
//! assert_eq!(points.len(), 1);
//! assert!((points[0].x - 2.0).abs() < 1e-9);
//! assert!(points[0].y.abs() < 1e-9);
//! ```

use crate::messages::LaserScan;
use std::iter::FusedIterator;

/// Cartesian point in the sensor frame (meters)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stateless projector from polar readings to Cartesian points
pub struct ScanProjector;

impl ScanProjector {
    /// Lazily project every reading of `scan`, in reading order
    ///
    /// Readings are not filtered: zero, negative, infinite and NaN ranges
    /// produce correspondingly degenerate points.
    pub fn project(scan: &LaserScan) -> ScanPoints<'_> {
        ScanPoints {
            ranges: &scan.ranges,
            angle_min: scan.angle_min as f64,
            angle_increment: scan.angle_increment as f64,
            index: 0,
        }
    }

    /// Project a single reading taken at `angle` radians
    pub fn project_reading(range: f32, angle: f64) -> Point2D {
        let range = range as f64;
        Point2D::new(range * angle.cos(), range * angle.sin())
    }
}

/// Iterator returned by [`ScanProjector::project`]
///
/// Clone it, or call `project` again, to walk the readings a second time.
#[derive(Debug, Clone)]
pub struct ScanPoints<'a> {
    ranges: &'a [f32],
    angle_min: f64,
    angle_increment: f64,
    index: usize,
}

impl Iterator for ScanPoints<'_> {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        let range = *self.ranges.get(self.index)?;
        let angle = self.angle_min + self.index as f64 * self.angle_increment;
        self.index += 1;
        Some(ScanProjector::project_reading(range, angle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ranges.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanPoints<'_> {}

impl FusedIterator for ScanPoints<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_single_reading_on_x_axis() {
        let scan = LaserScan::new(vec![2.0], 0.0, 0.0);
        let points: Vec<Point2D> = ScanProjector::project(&scan).collect();

        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].x, 2.0);
        assert_relative_eq!(points[0].y, 0.0);
    }

    #[test]
    fn test_empty_scan_yields_nothing() {
        let scan = LaserScan::new(Vec::new(), 0.0, 0.1);
        assert_eq!(ScanProjector::project(&scan).count(), 0);
    }

    #[test]
    fn test_quarter_turn_increments() {
        let scan = LaserScan::new(vec![0.5, 0.3, 0.9], 0.0, FRAC_PI_2);
        let points: Vec<Point2D> = ScanProjector::project(&scan).collect();

        assert_relative_eq!(points[0].x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(points[0].y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points[1].x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points[1].y, 0.3, epsilon = 1e-6);
        assert_relative_eq!(points[2].x, -0.9, epsilon = 1e-6);
        assert_relative_eq!(points[2].y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_angle_min_offset() {
        let scan = LaserScan::new(vec![1.0, 1.0], -FRAC_PI_2, PI);
        let points: Vec<Point2D> = ScanProjector::project(&scan).collect();

        assert_relative_eq!(points[0].y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(points[1].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_readings_pass_through() {
        let scan = LaserScan::new(vec![0.0, -1.0, f32::INFINITY, f32::NAN], 0.0, 0.0);
        let points: Vec<Point2D> = ScanProjector::project(&scan).collect();

        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point2D::new(0.0, 0.0));
        assert_relative_eq!(points[1].x, -1.0);
        assert!(points[2].x.is_infinite());
        assert!(points[3].x.is_nan() && points[3].y.is_nan());
    }

    #[test]
    fn test_iterator_is_restartable_and_exact() {
        let scan = LaserScan::new(vec![1.0, 2.0, 3.0], 0.0, 0.1);
        let mut points = ScanProjector::project(&scan);
        assert_eq!(points.len(), 3);

        points.next();
        let replay = points.clone();
        assert_eq!(points.len(), 2);
        assert_eq!(replay.collect::<Vec<_>>(), points.collect::<Vec<_>>());

        // A fresh projection starts over
        assert_eq!(ScanProjector::project(&scan).count(), 3);
    }
}
