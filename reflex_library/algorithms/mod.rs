//! Pure computational algorithms for reactive navigation
//!
//! No I/O lives here: nodes feed messages in and publish what comes out.
//!
//! # Available Algorithms
//!
//! ## Perception
//! - **scan_projector**: Polar range readings to sensor-frame points
//!
//! ## Mapping
//! - **occupancy_grid**: Fixed-size binary occupancy grid
//!
//! ## Control
//! - **reactive_controller**: Threshold go/turn obstacle avoidance

pub mod occupancy_grid;
pub mod reactive_controller;
pub mod scan_projector;
