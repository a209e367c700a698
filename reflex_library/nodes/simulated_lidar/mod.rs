use crate::nodes::reactive_navigation::{DEFAULT_CMD_TOPIC, DEFAULT_SCAN_TOPIC};
use crate::{CmdVel, LaserScan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reflex_core::error::{ReflexError, ReflexResult};
use reflex_core::{Hub, Node, NodeInfo};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

// Type alias for cleaner signatures
type Result<T> = ReflexResult<T>;

/// Keep the simulated robot this far from the walls (m)
const WALL_MARGIN: f32 = 0.05;

/// Room, sensor and pose settings for [`SimulatedLidarNode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedLidarConfig {
    pub scan_topic: String,
    pub cmd_topic: String,
    /// Side of the square room, which spans `[0, room_size]` on both axes (m)
    pub room_size: f32,
    pub num_beams: usize,
    pub range_min: f32,
    pub range_max: f32,
    /// Uniform noise amplitude added to every reading (m); 0 disables noise
    pub noise: f32,
    pub seed: u64,
    pub start_x: f32,
    pub start_y: f32,
    pub start_heading: f32,
    /// Simulated time per tick used to integrate commands (s)
    pub dt: f32,
}

impl Default for SimulatedLidarConfig {
    fn default() -> Self {
        Self {
            scan_topic: DEFAULT_SCAN_TOPIC.to_string(),
            cmd_topic: DEFAULT_CMD_TOPIC.to_string(),
            room_size: 10.0,
            num_beams: 360,
            range_min: 0.1,
            range_max: 30.0,
            noise: 0.0,
            seed: 42,
            start_x: 5.0,
            start_y: 5.0,
            start_heading: 0.0,
            dt: 0.2,
        }
    }
}

impl SimulatedLidarConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.room_size.is_finite() && self.room_size > 2.0 * WALL_MARGIN) {
            return Err(ReflexError::config(format!(
                "room_size must be finite and larger than {} m, got {}",
                2.0 * WALL_MARGIN,
                self.room_size
            )));
        }
        if self.num_beams == 0 {
            return Err(ReflexError::config("num_beams must be at least 1"));
        }
        if !(self.range_min >= 0.0 && self.range_min <= self.range_max) {
            return Err(ReflexError::config(format!(
                "range limits must satisfy 0 <= min <= max, got [{}, {}]",
                self.range_min, self.range_max
            )));
        }
        if !(self.noise >= 0.0 && self.noise.is_finite()) {
            return Err(ReflexError::config("noise must be finite and >= 0"));
        }
        if !(self.dt >= 0.0 && self.dt.is_finite()) {
            return Err(ReflexError::config("dt must be finite and >= 0"));
        }
        let start = [
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("start_heading", self.start_heading),
        ];
        for (name, value) in start {
            if !value.is_finite() {
                return Err(ReflexError::config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Planar robot pose inside the room
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

/// Simulated LiDAR Node - Synthetic 360 degree scans of a square room
///
/// Stands in for a real range finder and drive base: each tick it applies the
/// latest [`CmdVel`] to a unicycle pose, then publishes a [`LaserScan`] taken
/// from that pose. Beam `i` points at `-PI + i * 2PI / num_beams` relative to
/// the robot heading.
pub struct SimulatedLidarNode {
    publisher: Hub<LaserScan>,
    cmd_subscriber: Hub<CmdVel>,
    config: SimulatedLidarConfig,
    rng: StdRng,

    // State
    pose: Pose2D,
    cmd: CmdVel,
    scan_count: u64,
}

impl SimulatedLidarNode {
    /// Create a simulator with the default 10 m room and topics
    pub fn new() -> Result<Self> {
        Self::with_config(SimulatedLidarConfig::default())
    }

    pub fn with_config(config: SimulatedLidarConfig) -> Result<Self> {
        config.validate()?;

        let mut node = Self {
            publisher: Hub::new(&config.scan_topic)?,
            cmd_subscriber: Hub::new(&config.cmd_topic)?,
            rng: StdRng::seed_from_u64(config.seed),
            pose: Pose2D {
                x: config.start_x,
                y: config.start_y,
                heading: config.start_heading,
            },
            cmd: CmdVel::zero(),
            scan_count: 0,
            config,
        };
        node.clamp_to_room();
        Ok(node)
    }

    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    /// Advance the pose by one `dt` step of the current command
    fn integrate_motion(&mut self) {
        let dt = self.config.dt;
        self.pose.x += self.cmd.linear * self.pose.heading.cos() * dt;
        self.pose.y += self.cmd.linear * self.pose.heading.sin() * dt;
        self.pose.heading = (self.pose.heading + self.cmd.angular * dt).rem_euclid(TAU);
        self.clamp_to_room();
    }

    fn clamp_to_room(&mut self) {
        let max = self.config.room_size - WALL_MARGIN;
        self.pose.x = self.pose.x.clamp(WALL_MARGIN, max);
        self.pose.y = self.pose.y.clamp(WALL_MARGIN, max);
    }

    /// Distance from the robot to the first wall along `angle` (world frame)
    fn ray_to_wall(&self, angle: f32) -> f32 {
        let size = self.config.room_size;
        let axis_hit = |position: f32, direction: f32| {
            if direction > f32::EPSILON {
                (size - position) / direction
            } else if direction < -f32::EPSILON {
                -position / direction
            } else {
                f32::INFINITY
            }
        };

        axis_hit(self.pose.x, angle.cos()).min(axis_hit(self.pose.y, angle.sin()))
    }

    fn generate_scan(&mut self) -> LaserScan {
        let beams = self.config.num_beams;
        let angle_min = -PI;
        let angle_increment = TAU / beams as f32;

        let mut ranges = Vec::with_capacity(beams);
        for i in 0..beams {
            let angle = self.pose.heading + angle_min + i as f32 * angle_increment;
            let mut range = self.ray_to_wall(angle);
            if self.config.noise > 0.0 {
                range += self.rng.gen_range(-self.config.noise..=self.config.noise);
            }
            ranges.push(range.clamp(self.config.range_min, self.config.range_max));
        }

        let mut scan = LaserScan::new(ranges, angle_min, angle_increment);
        scan.range_min = self.config.range_min;
        scan.range_max = self.config.range_max;
        scan
    }
}

impl Node for SimulatedLidarNode {
    fn name(&self) -> &'static str {
        "SimulatedLidarNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        ctx.log_info(&format!(
            "Simulating {} beams in a {:.1} m room from ({:.2}, {:.2})",
            self.config.num_beams, self.config.room_size, self.pose.x, self.pose.y
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        if let Some(cmd) = self.cmd_subscriber.recv(ctx.as_deref_mut()) {
            self.cmd = cmd;
        }
        self.integrate_motion();
        if let Some(ctx) = ctx.as_deref_mut() {
            ctx.log_debug(&format!(
                "Pose ({:.2}, {:.2}, {:.2} rad)",
                self.pose.x, self.pose.y, self.pose.heading
            ));
        }

        let scan = self.generate_scan();
        self.scan_count += 1;
        self.publisher.send(scan, ctx);
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        ctx.log_info(&format!(
            "Published {} scan(s), final pose ({:.2}, {:.2}, {:.2} rad)",
            self.scan_count, self.pose.x, self.pose.y, self.pose.heading
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config_on(prefix: &str) -> SimulatedLidarConfig {
        SimulatedLidarConfig {
            scan_topic: format!("{}_scan", prefix),
            cmd_topic: format!("{}_cmd", prefix),
            ..Default::default()
        }
    }

    #[test]
    fn test_scan_from_room_center() {
        let config = SimulatedLidarConfig {
            num_beams: 4,
            ..config_on("sim_lidar_center")
        };
        let scan_sub: Hub<LaserScan> = Hub::new(&config.scan_topic).unwrap();
        let mut node = SimulatedLidarNode::with_config(config).unwrap();

        node.tick(None);

        // Beams at -PI, -PI/2, 0, PI/2 all see a wall 5 m away
        let scan = scan_sub.recv(None).unwrap();
        assert_eq!(scan.len(), 4);
        for range in &scan.ranges {
            assert_relative_eq!(*range, 5.0, epsilon = 1e-4);
        }
        assert_relative_eq!(scan.angle_min, -PI);
        assert_eq!(node.scan_count(), 1);
    }

    #[test]
    fn test_readings_clamped_to_sensor_limits() {
        let config = SimulatedLidarConfig {
            room_size: 100.0,
            start_x: 50.0,
            start_y: 50.0,
            range_max: 30.0,
            ..config_on("sim_lidar_clamp")
        };
        let scan_sub: Hub<LaserScan> = Hub::new(&config.scan_topic).unwrap();
        let mut node = SimulatedLidarNode::with_config(config).unwrap();

        node.tick(None);

        let scan = scan_sub.recv(None).unwrap();
        assert!(scan.ranges.iter().all(|&r| (0.1..=30.0).contains(&r)));
    }

    #[test]
    fn test_commands_move_the_robot() {
        let config = config_on("sim_lidar_motion");
        let cmd_pub: Hub<CmdVel> = Hub::new(&config.cmd_topic).unwrap();
        let mut node = SimulatedLidarNode::with_config(config).unwrap();

        cmd_pub.send(CmdVel::new(1.0, 0.0), None);
        node.tick(None);
        assert_relative_eq!(node.pose().x, 5.2, epsilon = 1e-5);
        assert_relative_eq!(node.pose().y, 5.0, epsilon = 1e-5);

        cmd_pub.send(CmdVel::new(0.0, 1.0), None);
        node.tick(None);
        assert_relative_eq!(node.pose().heading, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_robot_stays_inside_room() {
        let config = SimulatedLidarConfig {
            dt: 10.0,
            ..config_on("sim_lidar_walls")
        };
        let cmd_pub: Hub<CmdVel> = Hub::new(&config.cmd_topic).unwrap();
        let mut node = SimulatedLidarNode::with_config(config).unwrap();

        cmd_pub.send(CmdVel::new(5.0, 0.0), None);
        node.tick(None);

        assert_relative_eq!(node.pose().x, 10.0 - WALL_MARGIN);
    }

    #[test]
    fn test_noise_is_bounded_and_seeded() {
        let make = |prefix: &str| {
            let config = SimulatedLidarConfig {
                noise: 0.05,
                ..config_on(prefix)
            };
            let sub: Hub<LaserScan> = Hub::new(&config.scan_topic).unwrap();
            let mut node = SimulatedLidarNode::with_config(config).unwrap();
            node.tick(None);
            sub.recv(None).unwrap().ranges
        };

        let a = make("sim_lidar_noise_a");
        let b = make("sim_lidar_noise_b");
        assert_eq!(a, b);
        assert!(a.iter().all(|&r| r >= 5.0 - 0.05 - 1e-4));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = [
            SimulatedLidarConfig {
                num_beams: 0,
                ..Default::default()
            },
            SimulatedLidarConfig {
                room_size: 0.0,
                ..Default::default()
            },
            SimulatedLidarConfig {
                range_min: 5.0,
                range_max: 1.0,
                ..Default::default()
            },
            SimulatedLidarConfig {
                noise: -1.0,
                ..Default::default()
            },
            SimulatedLidarConfig {
                dt: f32::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_non_finite_start_pose_rejected() {
        for (x, y, heading) in [
            (f32::NAN, 5.0, 0.0),
            (5.0, f32::INFINITY, 0.0),
            (5.0, 5.0, f32::NAN),
        ] {
            let config = SimulatedLidarConfig {
                start_x: x,
                start_y: y,
                start_heading: heading,
                ..config_on("sim_lidar_bad_pose")
            };
            assert!(matches!(config.validate(), Err(ReflexError::Config(_))));
            assert!(SimulatedLidarNode::with_config(config).is_err());
        }
    }

    #[test]
    fn test_default_topics_match_navigation_node() {
        let config = SimulatedLidarConfig::default();
        assert_eq!(config.scan_topic, DEFAULT_SCAN_TOPIC);
        assert_eq!(config.cmd_topic, DEFAULT_CMD_TOPIC);
    }
}
