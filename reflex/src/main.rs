mod config;

use anyhow::Context;
use clap::Parser;
use config::ReflexConfig;
use reflex_core::{NodeState, Scheduler};
use reflex_library::nodes::{ReactiveNavigationNode, SimulatedLidarNode};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reflex")]
#[command(about = "REFLEX - Reactive obstacle avoidance from range scans")]
#[command(version)]
struct Cli {
    /// Config file (TOML or YAML); defaults to the standard search paths
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Control loop rate in Hz (overrides the config file)
    #[arg(short = 'r', long = "rate", value_name = "HZ")]
    rate: Option<f64>,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(short = 'd', long = "duration", value_name = "SECS")]
    duration: Option<f64>,

    /// Feed the controller from a simulated range finder in a square room
    #[arg(short = 's', long = "simulate")]
    simulate: bool,

    /// Log level for REFLEX crates; RUST_LOG takes precedence when set
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let (mut config, source) = ReflexConfig::resolve(cli.config.as_deref())?;
    match &source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    if let Some(rate) = cli.rate {
        config.scheduler.rate_hz = rate;
    }
    if cli.simulate {
        config.simulation.enabled = true;
    }
    config.validate()?;

    let duration = cli
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("--duration must be a non-negative number of seconds")?;

    let mut scheduler = Scheduler::new().with_config(config.scheduler.clone());
    if config.simulation.enabled {
        let lidar = SimulatedLidarNode::with_config(config.simulated_lidar())?;
        scheduler.add(Box::new(lidar), 0, None);
    } else {
        tracing::warn!(
            "No scan source in this process; waiting for scans on '{}'",
            config.navigation.scan_topic
        );
    }
    let navigation = ReactiveNavigationNode::with_config(config.navigation.clone())?;
    scheduler.add(Box::new(navigation), 1, None);

    match duration {
        Some(duration) => scheduler.run_for(duration)?,
        None => scheduler.run()?,
    }

    for name in scheduler.get_node_list() {
        if let Some(NodeState::Error(reason)) = scheduler.get_node_state(&name) {
            tracing::error!("Node '{}' ended in error: {}", name, reason);
        }
    }

    if let Some(metrics) = scheduler.get_node_metrics("ReactiveNavigationNode") {
        tracing::info!(
            "Navigation ran {} tick(s), published {} command(s), avg tick {:.3} ms",
            metrics.total_ticks,
            metrics.messages_sent,
            metrics.avg_tick_duration_ms
        );
    }

    Ok(())
}

/// Route `tracing` and `log` records through one `EnvFilter`
fn init_logging(level: &str) {
    let default_filter = format!("reflex={0},reflex_core={0},reflex_library={0}", level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
