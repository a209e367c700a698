use reflex_core::LogSummary;
use serde::{Deserialize, Serialize};

/// Command velocity message for robot control
///
/// The motion command emitted by the reactive controller: forward speed and
/// yaw rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CmdVel {
    pub stamp_nanos: u64,
    pub linear: f32,  // m/s forward velocity
    pub angular: f32, // rad/s turning velocity
}

impl CmdVel {
    /// Create a new CmdVel message with current timestamp
    pub fn new(linear: f32, angular: f32) -> Self {
        Self {
            stamp_nanos: super::timestamp_nanos(),
            linear,
            angular,
        }
    }

    /// Create a zero velocity command (stop)
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Default for CmdVel {
    fn default() -> Self {
        Self::zero()
    }
}

impl LogSummary for CmdVel {
    fn log_summary(&self) -> String {
        format!("CmdVel(lin:{:.2}, ang:{:.2})", self.linear, self.angular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cmd_vel_creation() {
        let cmd = CmdVel::new(1.5, 0.8);
        assert_relative_eq!(cmd.linear, 1.5);
        assert_relative_eq!(cmd.angular, 0.8);
        assert!(cmd.stamp_nanos > 0);
    }

    #[test]
    fn test_cmd_vel_zero() {
        let cmd = CmdVel::zero();
        assert_relative_eq!(cmd.linear, 0.0);
        assert_relative_eq!(cmd.angular, 0.0);
    }

    #[test]
    fn test_log_summary() {
        let cmd = CmdVel::new(0.0, 1.0);
        assert_eq!(cmd.log_summary(), "CmdVel(lin:0.00, ang:1.00)");
    }
}
