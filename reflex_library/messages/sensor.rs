use reflex_core::LogSummary;
use serde::{Deserialize, Serialize};

/// One frame of range readings from a scanning range finder
///
/// Reading `i` was taken at angle `angle_min + i * angle_increment`.
/// `range_min`/`range_max` describe the sensor; they are informational and
/// nothing in REFLEX filters readings against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Range readings in meters
    pub ranges: Vec<f32>,
    /// Angle of the first reading (radians)
    pub angle_min: f32,
    /// Angle of the last reading (radians)
    pub angle_max: f32,
    /// Angular distance between readings (radians)
    pub angle_increment: f32,
    pub range_min: f32,
    pub range_max: f32,
    /// Nanoseconds since epoch
    pub timestamp: u64,
}

impl Default for LaserScan {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            angle_min: 0.0,
            angle_max: 0.0,
            angle_increment: 0.0,
            range_min: 0.0,
            range_max: f32::INFINITY,
            timestamp: 0,
        }
    }
}

impl LaserScan {
    /// Build a scan from readings and angular metadata, stamped now
    pub fn new(ranges: Vec<f32>, angle_min: f32, angle_increment: f32) -> Self {
        let angle_max = match ranges.len() {
            0 => angle_min,
            n => angle_min + (n - 1) as f32 * angle_increment,
        };

        Self {
            ranges,
            angle_min,
            angle_max,
            angle_increment,
            timestamp: super::timestamp_nanos(),
            ..Default::default()
        }
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Smallest reading, ignoring NaN; `None` for an empty scan
    ///
    /// A scan made only of NaN readings yields `Some(NaN)`.
    pub fn min_range(&self) -> Option<f32> {
        let mut readings = self.ranges.iter().copied();
        let first = readings.next()?;
        Some(readings.fold(first, f32::min))
    }

    /// Whether any reading is NaN or infinite
    pub fn has_non_finite(&self) -> bool {
        self.ranges.iter().any(|r| !r.is_finite())
    }
}

impl LogSummary for LaserScan {
    fn log_summary(&self) -> String {
        format!(
            "LaserScan({} readings, {:.2}..{:.2} rad)",
            self.ranges.len(),
            self.angle_min,
            self.angle_max
        )
    }
}
