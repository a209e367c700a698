//! Message types exchanged between REFLEX nodes
//!
//! - Sensor: range scans from a rotating or fan-beam range finder
//! - Control: velocity commands for the drive base

pub mod cmd_vel;
pub mod sensor;

pub use cmd_vel::CmdVel;
pub use sensor::LaserScan;

/// Nanoseconds since the Unix epoch, 0 if the clock is before it
pub(crate) fn timestamp_nanos() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
