use crate::algorithms::reactive_controller::{MotionMode, ReactiveConfig, ReactiveController};
use crate::{CmdVel, LaserScan};
use reflex_core::error::ReflexResult;
use reflex_core::{Hub, Node, NodeInfo};
use serde::{Deserialize, Serialize};

// Type alias for cleaner signatures
type Result<T> = ReflexResult<T>;

pub const DEFAULT_SCAN_TOPIC: &str = "scan_input";
pub const DEFAULT_CMD_TOPIC: &str = "motion_output";

/// Topics and controller tuning for [`ReactiveNavigationNode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveNavigationConfig {
    pub scan_topic: String,
    pub cmd_topic: String,
    pub controller: ReactiveConfig,
}

impl Default for ReactiveNavigationConfig {
    fn default() -> Self {
        Self {
            scan_topic: DEFAULT_SCAN_TOPIC.to_string(),
            cmd_topic: DEFAULT_CMD_TOPIC.to_string(),
            controller: ReactiveConfig::default(),
        }
    }
}

/// Reactive Navigation Node - Scan-driven go/turn obstacle avoidance
///
/// Keeps the newest [`LaserScan`] from its scan topic and, every tick,
/// publishes a [`CmdVel`]: forward while the closest reading is beyond the
/// obstacle threshold, rotate in place otherwise. Each evaluated scan is also
/// marked into an occupancy grid. Nothing is published until the first
/// non-empty scan arrives.
pub struct ReactiveNavigationNode {
    scan_subscriber: Hub<LaserScan>,
    cmd_publisher: Hub<CmdVel>,
    controller: ReactiveController,

    // State
    last_mode: Option<MotionMode>,
    commands_published: u64,
}

impl ReactiveNavigationNode {
    /// Create a node on the default "scan_input" / "motion_output" topics
    pub fn new() -> Result<Self> {
        Self::with_config(ReactiveNavigationConfig::default())
    }

    /// Create a node on custom topics with default controller tuning
    pub fn new_with_topics(scan_topic: &str, cmd_topic: &str) -> Result<Self> {
        Self::with_config(ReactiveNavigationConfig {
            scan_topic: scan_topic.to_string(),
            cmd_topic: cmd_topic.to_string(),
            ..Default::default()
        })
    }

    pub fn with_config(config: ReactiveNavigationConfig) -> Result<Self> {
        config.controller.validate()?;

        Ok(Self {
            scan_subscriber: Hub::new(&config.scan_topic)?,
            cmd_publisher: Hub::new(&config.cmd_topic)?,
            controller: ReactiveController::new(config.controller),
            last_mode: None,
            commands_published: 0,
        })
    }

    pub fn controller(&self) -> &ReactiveController {
        &self.controller
    }

    pub fn commands_published(&self) -> u64 {
        self.commands_published
    }
}

impl Node for ReactiveNavigationNode {
    fn name(&self) -> &'static str {
        "ReactiveNavigationNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        let config = self.controller.config();
        let (width, height) = self.controller.grid().get_dimensions();
        ctx.log_info(&format!(
            "Listening on '{}', commanding '{}' (threshold {:.2} m, grid {}x{})",
            self.scan_subscriber.get_topic_name(),
            self.cmd_publisher.get_topic_name(),
            config.obstacle_threshold,
            width,
            height
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        if let Some(scan) = self.scan_subscriber.recv(ctx.as_deref_mut()) {
            if scan.is_empty() {
                if let Some(ctx) = ctx.as_deref_mut() {
                    ctx.log_warning("Received a scan with no readings, nothing to publish");
                }
            }
            self.controller.on_scan_received(scan);
        }

        let Some(cmd) = self.controller.tick() else {
            return;
        };

        let mode = self.controller.mode();
        if mode != self.last_mode {
            if let (Some(ctx), Some(mode)) = (ctx.as_deref_mut(), mode) {
                ctx.log_info(&format!(
                    "Switching to {:?}: linear {:.2} m/s, angular {:.2} rad/s",
                    mode, cmd.linear, cmd.angular
                ));
            }
            self.last_mode = mode;
        }

        self.cmd_publisher.send(cmd, ctx);
        self.commands_published += 1;
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        // No stop command is sent; the drive base keeps the last command
        ctx.log_info(&format!(
            "Published {} command(s), {} occupied cell(s) mapped",
            self.commands_published,
            self.controller.grid().occupied_count()
        ));
        Ok(())
    }
}
