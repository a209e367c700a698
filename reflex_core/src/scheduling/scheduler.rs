use super::config::SchedulerConfig;
use crate::core::{Node, NodeInfo, NodeMetrics, NodeState};
use crate::error::{ReflexError, ReflexResult};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;

/// Set by the Ctrl-C handler; observed by every scheduler in the process
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);
static SIGNAL_HANDLER: Once = Once::new();

fn install_signal_handler() {
    SIGNAL_HANDLER.call_once(|| {
        if let Err(e) = ctrlc::set_handler(|| {
            eprintln!(
                "{}",
                "\nCtrl+C received! Shutting down REFLEX scheduler...".red()
            );
            SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
        }) {
            log::warn!("Failed to set signal handler: {}", e);
        }
    });
}

/// Node registration info with lifecycle tracking
struct RegisteredNode {
    node: Box<dyn Node>,
    priority: u32,
    initialized: bool,
    context: NodeInfo,
}

/// Central orchestrator: holds nodes, drives the tick loop.
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<AtomicBool>,
    config: SchedulerConfig,
    tick_count: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler ticking at the default 5 Hz.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
            config: SchedulerConfig::default(),
            tick_count: 0,
        }
    }

    /// Apply a configuration (builder pattern)
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set scheduler name (for debugging/logging)
    pub fn with_name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    /// Set the tick frequency in Hz
    pub fn with_rate(mut self, rate_hz: f64) -> Self {
        self.config.rate_hz = rate_hz;
        self
    }

    /// Register a node. Lower `priority` values tick first; ties keep insertion order.
    ///
    /// `logging_enabled` defaults to `true` when `None`.
    pub fn add(
        &mut self,
        node: Box<dyn Node>,
        priority: u32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let node_name = node.name().to_string();
        let context = NodeInfo::new(node_name.clone(), logging_enabled.unwrap_or(true));

        self.nodes.push(RegisteredNode {
            node,
            priority,
            initialized: false,
            context,
        });
        self.nodes.sort_by_key(|registered| registered.priority);

        log::debug!(
            "Added node '{}' with priority {} to '{}'",
            node_name,
            priority,
            self.config.name
        );
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Check if the scheduler is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
    }

    /// Stop the scheduler; the loop exits before its next tick
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Shared flag that stops the loop when set to `false` from another thread
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Number of completed scheduler cycles
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Initialize pending nodes, then tick every healthy node once
    pub fn spin_once(&mut self) {
        self.initialize_nodes();
        self.tick_nodes();
    }

    /// Run all nodes until Ctrl-C or [`stop`](Self::stop)
    pub fn run(&mut self) -> ReflexResult<()> {
        self.run_with_limit(None)
    }

    /// Run all nodes for a specified duration, then shutdown gracefully
    pub fn run_for(&mut self, duration: Duration) -> ReflexResult<()> {
        self.run_with_limit(Some(duration))
    }

    fn run_with_limit(&mut self, duration: Option<Duration>) -> ReflexResult<()> {
        self.config.validate()?;
        install_signal_handler();

        // A thread already inside a tokio runtime cannot block on another one
        if tokio::runtime::Handle::try_current().is_ok() {
            log::debug!(
                "Scheduler '{}' called from a tokio runtime, ticking on a dedicated thread",
                self.config.name
            );
            let outcome =
                std::thread::scope(|scope| scope.spawn(|| self.run_loop(duration)).join());
            return match outcome {
                Ok(result) => result,
                Err(_) => Err(ReflexError::Internal("scheduler thread panicked".into())),
            };
        }

        self.run_loop(duration)
    }

    fn run_loop(&mut self, duration: Option<Duration>) -> ReflexResult<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ReflexError::Internal(format!("Failed to create tokio runtime: {}", e)))?;

        let period = self.config.period();
        log::info!(
            "Scheduler '{}' starting {} node(s) at {:.1} Hz",
            self.config.name,
            self.nodes.len(),
            self.config.rate_hz
        );

        rt.block_on(async {
            let start_time = Instant::now();
            self.initialize_nodes();

            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                if !self.is_running() {
                    break;
                }
                if let Some(max_duration) = duration {
                    if start_time.elapsed() >= max_duration {
                        log::info!("Scheduler reached time limit of {:?}", max_duration);
                        break;
                    }
                }

                self.tick_nodes();
            }
        });

        self.shutdown_nodes();
        log::info!(
            "Scheduler '{}' shutdown complete after {} tick(s)",
            self.config.name,
            self.tick_count
        );
        Ok(())
    }

    fn initialize_nodes(&mut self) {
        for registered in self.nodes.iter_mut() {
            if registered.initialized
                || matches!(registered.context.state(), NodeState::Error(_))
            {
                continue;
            }

            let ctx = &mut registered.context;
            ctx.set_state(NodeState::Initializing);
            match registered.node.init(ctx) {
                Ok(()) => {
                    registered.initialized = true;
                    ctx.set_state(NodeState::Running);
                }
                Err(e) => {
                    ctx.transition_to_error(format!("Initialization failed: {}", e));
                }
            }
        }
    }

    fn tick_nodes(&mut self) {
        for registered in self.nodes.iter_mut().filter(|r| r.initialized) {
            let ctx = &mut registered.context;
            ctx.start_tick();
            registered.node.tick(Some(&mut *ctx));
            ctx.record_tick();
        }
        self.tick_count += 1;
    }

    fn shutdown_nodes(&mut self) {
        for registered in self.nodes.iter_mut().filter(|r| r.initialized) {
            let node_name = registered.node.name();
            let ctx = &mut registered.context;
            ctx.set_state(NodeState::Stopping);

            match registered.node.shutdown(ctx) {
                Ok(()) => ctx.set_state(NodeState::Stopped),
                Err(e) => ctx.transition_to_error(format!(
                    "Error shutting down node '{}': {}",
                    node_name, e
                )),
            }
            registered.initialized = false;
        }
    }

    /// Names of all registered nodes in tick order
    pub fn get_node_list(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|registered| registered.node.name().to_string())
            .collect()
    }

    pub fn get_node_state(&self, name: &str) -> Option<NodeState> {
        self.find(name).map(|r| r.context.state().clone())
    }

    pub fn get_node_metrics(&self, name: &str) -> Option<NodeMetrics> {
        self.find(name).map(|r| r.context.metrics().clone())
    }


    fn find(&self, name: &str) -> Option<&RegisteredNode> {
        self.nodes.iter().find(|r| r.node.name() == name)
    }
}
