use crate::error::{ReflexError, ReflexResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scheduler settings, loadable from the `[scheduler]` section of a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Name used in log lines
    pub name: String,
    /// Tick frequency in Hz
    pub rate_hz: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: "ReflexScheduler".to_string(),
            rate_hz: 5.0,
        }
    }
}

impl SchedulerConfig {
    pub fn with_rate(rate_hz: f64) -> Self {
        Self {
            rate_hz,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ReflexResult<()> {
        if !self.rate_hz.is_finite() || self.rate_hz <= 0.0 {
            return Err(ReflexError::config(format!(
                "Scheduler rate must be a positive finite number of Hz, got {}",
                self.rate_hz
            )));
        }
        Ok(())
    }

    /// Tick period; only meaningful once [`validate`](Self::validate) passed
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }
}
