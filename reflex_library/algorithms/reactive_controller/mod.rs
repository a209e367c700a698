//! Reactive Go/Turn Controller
//!
//! Threshold policy on the closest range reading: drive straight while the
//! nearest obstacle is farther than `obstacle_threshold`, otherwise turn in
//! place. Every evaluated scan is also projected into an [`OccupancyGrid`].
//!
//! # Example
//!
//! ```rust
//! use reflex_library::algorithms::reactive_controller::{ReactiveConfig, ReactiveController};
//! use reflex_library::messages::LaserScan;
//!
//! let mut controller = ReactiveController::new(ReactiveConfig::default());
//! assert!(controller.tick().is_none()); // nothing received yet
//!
//! controller.on_scan_received(LaserScan::new(vec![3.0, 2.5, 4.0], -0.5, 0.5));
//! let cmd = controller.tick().unwrap();
//! assert_eq!((cmd.linear, cmd.angular), (1.0, 0.0));
//! ```

use super::occupancy_grid::{OccupancyGrid, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::scan_projector::ScanProjector;
use crate::messages::{CmdVel, LaserScan};
use reflex_core::{ReflexError, ReflexResult};
use serde::{Deserialize, Serialize};

/// Value `obstacle_distance` holds between ticks
pub const OBSTACLE_DISTANCE_SENTINEL: f32 = 100.0;

/// Tuning for the go/turn policy and the grid size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveConfig {
    /// Advance only while the closest reading is strictly beyond this (m)
    pub obstacle_threshold: f32,
    /// Linear velocity while advancing (m/s)
    pub forward_speed: f32,
    /// Angular velocity while turning in place (rad/s)
    pub turn_rate: f32,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            obstacle_threshold: 1.0,
            forward_speed: 1.0,
            turn_rate: 1.0,
            grid_width: DEFAULT_WIDTH,
            grid_height: DEFAULT_HEIGHT,
        }
    }
}

impl ReactiveConfig {
    pub fn validate(&self) -> ReflexResult<()> {
        let values = [
            ("obstacle_threshold", self.obstacle_threshold),
            ("forward_speed", self.forward_speed),
            ("turn_rate", self.turn_rate),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ReflexError::config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Which branch of the policy produced the current command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// Path ahead is clear: drive forward
    Advance,
    /// Obstacle within threshold: rotate in place
    Rotate,
}

/// Holds the latest scan, the current command and the occupancy grid
#[derive(Debug, Clone)]
pub struct ReactiveController {
    config: ReactiveConfig,
    latest_scan: Option<LaserScan>,
    command: CmdVel,
    mode: Option<MotionMode>,
    grid: OccupancyGrid,
    obstacle_distance: f32,
}

impl ReactiveController {
    pub fn new(config: ReactiveConfig) -> Self {
        let grid = OccupancyGrid::new(config.grid_width, config.grid_height);
        Self {
            config,
            latest_scan: None,
            command: CmdVel::zero(),
            mode: None,
            grid,
            obstacle_distance: OBSTACLE_DISTANCE_SENTINEL,
        }
    }

    /// Replace the stored scan; no processing happens until the next tick
    pub fn on_scan_received(&mut self, scan: LaserScan) {
        self.latest_scan = Some(scan);
    }

    /// Run one control cycle on the stored scan
    ///
    /// Returns the command to transmit, or `None` when no scan has arrived
    /// yet or the stored scan has no readings (the grid is left untouched).
    /// The stored scan is kept, so consecutive ticks without a new delivery
    /// re-evaluate it.
    pub fn tick(&mut self) -> Option<CmdVel> {
        let scan = self.latest_scan.as_ref()?;
        self.obstacle_distance = scan.min_range()?;

        if self.obstacle_distance.is_nan() {
            log::debug!("Scan has only NaN readings, treating the path as blocked");
        } else if scan.has_non_finite() {
            log::debug!(
                "Scan contains non-finite readings, closest reading {:.3} m",
                self.obstacle_distance
            );
        }

        let mode = if self.obstacle_distance > self.config.obstacle_threshold {
            MotionMode::Advance
        } else {
            MotionMode::Rotate
        };
        match mode {
            MotionMode::Advance => {
                self.command.linear = self.config.forward_speed;
                self.command.angular = 0.0;
            }
            MotionMode::Rotate => {
                self.command.linear = 0.0;
                self.command.angular = self.config.turn_rate;
            }
        }
        self.command.stamp_nanos = crate::messages::timestamp_nanos();
        self.mode = Some(mode);

        let newly_occupied = self.grid.integrate(ScanProjector::project(scan));
        log::debug!(
            "Obstacle at {:.3} m -> {:?}, {} new occupied cell(s)",
            self.obstacle_distance,
            mode,
            newly_occupied
        );

        self.obstacle_distance = OBSTACLE_DISTANCE_SENTINEL;
        Some(self.command)
    }

    /// The current command (zero until the first successful tick)
    pub fn command(&self) -> &CmdVel {
        &self.command
    }

    /// Policy branch taken by the last successful tick
    pub fn mode(&self) -> Option<MotionMode> {
        self.mode
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn latest_scan(&self) -> Option<&LaserScan> {
        self.latest_scan.as_ref()
    }

    /// Scratch minimum range; reads [`OBSTACLE_DISTANCE_SENTINEL`] outside a tick
    pub fn obstacle_distance(&self) -> f32 {
        self.obstacle_distance
    }

    pub fn config(&self) -> &ReactiveConfig {
        &self.config
    }
}

impl Default for ReactiveController {
    fn default() -> Self {
        Self::new(ReactiveConfig::default())
    }
}
