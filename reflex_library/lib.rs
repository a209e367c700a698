//! # REFLEX Library
//!
//! Messages, algorithms and nodes for reactive obstacle avoidance on top of
//! `reflex_core`.
//!
//! ## Structure
//!
//! ```text
//! reflex_library/
//! ── messages/       # LaserScan and CmdVel
//! ── algorithms/     # Scan projection, occupancy grid, go/turn controller
//! ── nodes/          # ReactiveNavigationNode, SimulatedLidarNode
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use reflex_library::prelude::*;
//!
//! let mut controller = ReactiveController::new(ReactiveConfig::default());
//! controller.on_scan_received(LaserScan::new(vec![0.6, 2.0], 0.0, 0.1));
//!
//! let cmd = controller.tick().unwrap();
//! assert_eq!((cmd.linear, cmd.angular), (0.0, 1.0));
//! assert!(controller.grid().is_occupied(0, 0));
//! ```

pub mod algorithms;
pub mod messages;
pub mod nodes;

// Re-export core traits needed for message types
pub use reflex_core::core::LogSummary;

// Re-export message types at the crate root for convenience
pub use messages::*;

pub use nodes::{ReactiveNavigationNode, SimulatedLidarNode};

/// Everything needed to assemble a reactive navigation pipeline
pub mod prelude {
    pub use crate::algorithms::occupancy_grid::OccupancyGrid;
    pub use crate::algorithms::reactive_controller::{
        MotionMode, ReactiveConfig, ReactiveController,
    };
    pub use crate::algorithms::scan_projector::{Point2D, ScanProjector};
    pub use crate::messages::{CmdVel, LaserScan};
    pub use crate::nodes::{
        ReactiveNavigationConfig, ReactiveNavigationNode, SimulatedLidarConfig, SimulatedLidarNode,
    };
    pub use reflex_core::{Hub, Node, NodeInfo, Scheduler};
}
