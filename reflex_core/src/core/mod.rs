//! # Core types and traits for the REFLEX runtime
//!
//! - **Node**: the unit of computation driven by the scheduler
//! - **NodeInfo**: per-node context handed to `init`, `tick` and `shutdown`
//! - **LogSummary**: compact message summaries for pub/sub logging
//!
//! ## Node Lifecycle
//!
//! 1. **Construction** - node is created with its configuration and hubs
//! 2. **Initialization** - `init()` is called once before the first tick
//! 3. **Execution** - `tick()` is called once per scheduler period
//! 4. **Shutdown** - `shutdown()` is called once after the loop stops

pub mod node;

pub use node::{LogSummary, Node, NodeConfig, NodeInfo, NodeMetrics, NodeState};
