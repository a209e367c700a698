//! Fixed-rate scheduling for REFLEX nodes
//!
//! The [`Scheduler`] owns its nodes and ticks them on a single thread, in
//! priority order, once per period. It stops between ticks when Ctrl-C is
//! pressed, when [`Scheduler::stop`] is called, or when a `run_for` duration
//! elapses.

pub mod config;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use scheduler::Scheduler;
