//! # REFLEX Core
//!
//! The runtime the REFLEX reactive navigation node plugs into:
//!
//! - **Nodes**: units of computation with an `init` / `tick` / `shutdown` lifecycle
//! - **Communication**: named in-process topics holding the latest message
//! - **Scheduling**: a single-threaded, fixed-rate tick loop with Ctrl-C shutdown
//! - **Config**: TOML/YAML loading shared by every crate in the workspace
//!
//! ## Quick Start
//!
//! ```rust
//! use reflex_core::{Hub, Node, NodeInfo, Scheduler};
//!
//! struct Counter {
//!     output: Hub<u64>,
//!     count: u64,
//! }
//!
//! impl Node for Counter {
//!     fn name(&self) -> &'static str { "Counter" }
//!
//!     fn tick(&mut self, ctx: Option<&mut NodeInfo>) {
//!         self.count += 1;
//!         self.output.send(self.count, ctx);
//!     }
//! }
//!
//! let listener: Hub<u64> = Hub::new("doc_counter").unwrap();
//! let mut scheduler = Scheduler::new();
//! scheduler.add(Box::new(Counter { output: Hub::new("doc_counter").unwrap(), count: 0 }), 0, Some(false));
//! scheduler.spin_once();
//! assert_eq!(listener.recv(None), Some(1));
//! ```

pub mod communication;
pub mod config;
pub mod core;
pub mod error;
pub mod scheduling;

pub use communication::{Hub, HubMetrics};
pub use core::{LogSummary, Node, NodeInfo, NodeState};
pub use error::{ReflexError, ReflexResult};
pub use scheduling::{Scheduler, SchedulerConfig};
