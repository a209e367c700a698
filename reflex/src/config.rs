//! Config file layout for the `reflex` runner
//!
//! ```toml
//! [scheduler]
//! rate_hz = 5.0
//!
//! [navigation]
//! scan_topic = "scan_input"
//! cmd_topic = "motion_output"
//!
//! [navigation.controller]
//! obstacle_threshold = 1.0
//!
//! [simulation]
//! enabled = true
//! room_size = 10.0
//! ```
//!
//! Every section and field is optional.

use reflex_core::config::{find_config_file, load_config};
use reflex_core::error::ReflexResult;
use reflex_core::SchedulerConfig;
use reflex_library::nodes::{ReactiveNavigationConfig, SimulatedLidarConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflexConfig {
    pub scheduler: SchedulerConfig,
    pub navigation: ReactiveNavigationConfig,
    pub simulation: SimulationConfig,
}

/// In-process simulated range finder; its topics follow `[navigation]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub lidar: SimulatedLidarConfig,
}

impl ReflexConfig {
    /// Load `path`, else the first file on the search paths, else defaults
    ///
    /// Returns the file actually used alongside the config.
    pub fn resolve(path: Option<&Path>) -> ReflexResult<(Self, Option<PathBuf>)> {
        let source = match path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(),
        };

        match source {
            Some(file) => Ok((load_config(&file)?, Some(file))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Simulator settings wired to the navigation node's topics
    pub fn simulated_lidar(&self) -> SimulatedLidarConfig {
        SimulatedLidarConfig {
            scan_topic: self.navigation.scan_topic.clone(),
            cmd_topic: self.navigation.cmd_topic.clone(),
            ..self.simulation.lidar.clone()
        }
    }

    pub fn validate(&self) -> ReflexResult<()> {
        self.scheduler.validate()?;
        self.navigation.controller.validate()?;
        if self.simulation.enabled {
            self.simulation.lidar.validate()?;
        }
        Ok(())
    }
}
