//! REFLEX Library Nodes
//!
//! Ready-made nodes built on the algorithms in this crate. Every node has a
//! `new()` constructor using the default topics and a `with_config()`
//! constructor for custom topics and tuning.
//!
//! # Navigation
//! - `ReactiveNavigationNode` - Go/turn obstacle avoidance from range scans
//!
//! # Simulation
//! - `SimulatedLidarNode` - Square-room range finder and unicycle drive base
//!
//! # Usage Examples
//!
//! ```rust
//! use reflex_library::nodes::{ReactiveNavigationNode, SimulatedLidarNode};
//! use reflex_core::Scheduler;
//!
//! let mut scheduler = Scheduler::new().with_rate(5.0);
//! scheduler.add(Box::new(SimulatedLidarNode::new().unwrap()), 0, Some(false));
//! scheduler.add(Box::new(ReactiveNavigationNode::new().unwrap()), 1, Some(false));
//! scheduler.spin_once();
//! ```

pub mod reactive_navigation;
pub mod simulated_lidar;

pub use reactive_navigation::{ReactiveNavigationConfig, ReactiveNavigationNode};
pub use simulated_lidar::{Pose2D, SimulatedLidarConfig, SimulatedLidarNode};
