use crate::error::ReflexResult;
use std::fmt;
use std::time::Instant;

/// Trait for providing lightweight logging summaries of message types
///
/// Large messages (scans with hundreds of readings) should only summarize
/// their metadata instead of formatting every element.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Node states for monitoring and lifecycle management
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Uninitialized => write!(f, "Uninitialized"),
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Stopping => write!(f, "Stopping"),
            NodeState::Stopped => write!(f, "Stopped"),
            NodeState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Performance metrics for node execution
#[derive(Debug, Clone, Default)]
pub struct NodeMetrics {
    pub total_ticks: u64,
    pub avg_tick_duration_ms: f64,
    pub max_tick_duration_ms: f64,
    pub last_tick_duration_ms: f64,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub errors_count: u64,
    pub warnings_count: u64,
}

/// Configuration parameters for node behavior
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Emit pub/sub and lifecycle log lines for this node
    pub enable_logging: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            enable_logging: true,
        }
    }
}

/// Context and bookkeeping for a single node
pub struct NodeInfo {
    name: String,
    state: NodeState,
    config: NodeConfig,
    metrics: NodeMetrics,
    tick_start_time: Option<Instant>,
}

impl NodeInfo {
    pub fn new(node_name: String, logging_enabled: bool) -> Self {
        Self {
            name: node_name,
            state: NodeState::Uninitialized,
            config: NodeConfig {
                enable_logging: logging_enabled,
            },
            metrics: NodeMetrics::default(),
            tick_start_time: None,
        }
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn set_state(&mut self, new_state: NodeState) {
        if self.state != new_state {
            log::trace!("[{}] {} -> {}", self.name, self.state, new_state);
            self.state = new_state;
        }
    }

    pub fn transition_to_error(&mut self, error_msg: String) {
        self.log_error(&error_msg);
        self.set_state(NodeState::Error(error_msg));
    }

    // Tick Management
    pub fn start_tick(&mut self) {
        self.tick_start_time = Some(Instant::now());
    }

    pub fn record_tick(&mut self) {
        let Some(start_time) = self.tick_start_time.take() else {
            return;
        };
        let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        self.metrics.total_ticks += 1;
        self.metrics.last_tick_duration_ms = duration_ms;
        if duration_ms > self.metrics.max_tick_duration_ms {
            self.metrics.max_tick_duration_ms = duration_ms;
        }

        let previous_total =
            self.metrics.avg_tick_duration_ms * (self.metrics.total_ticks - 1) as f64;
        self.metrics.avg_tick_duration_ms =
            (previous_total + duration_ms) / self.metrics.total_ticks as f64;
    }

    /// Record an outgoing message; `summary` is computed before the message is moved
    pub fn log_pub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            log::debug!("{} --PUB--> '{}' = {}", self.name, topic, summary);
        }
        self.metrics.messages_sent += 1;
    }

    /// Record an incoming message
    pub fn log_sub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            log::debug!("{} <--SUB-- '{}' = {}", self.name, topic, summary);
        }
        self.metrics.messages_received += 1;
    }

    pub fn log_info(&self, message: &str) {
        if self.config.enable_logging {
            log::info!("[{}] {}", self.name, message);
        }
    }

    pub fn log_debug(&self, message: &str) {
        if self.config.enable_logging {
            log::debug!("[{}] {}", self.name, message);
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.config.enable_logging {
            log::warn!("[{}] {}", self.name, message);
        }
        self.metrics.warnings_count += 1;
    }

    pub fn log_error(&mut self, message: &str) {
        // Errors are always reported, even with node logging disabled
        log::error!("[{}] {}", self.name, message);
        self.metrics.errors_count += 1;
    }

    // Getters
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }

    pub fn set_logging(&mut self, enabled: bool) {
        self.config.enable_logging = enabled;
    }
}

/// Trait for REFLEX nodes with full lifecycle support
pub trait Node: Send {
    /// Get the node's name (must be unique within a scheduler)
    fn name(&self) -> &'static str;

    /// Initialize the node (called once at startup)
    fn init(&mut self, ctx: &mut NodeInfo) -> ReflexResult<()> {
        ctx.log_info("Node initialized successfully");
        Ok(())
    }

    /// Main execution step (called once per scheduler period)
    fn tick(&mut self, ctx: Option<&mut NodeInfo>);

    /// Shutdown the node (called once at cleanup)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> ReflexResult<()> {
        ctx.log_info("Node shutdown successfully");
        Ok(())
    }
}

impl LogSummary for f32 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for u32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for usize {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for bool {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}
