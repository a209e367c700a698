use crate::core::node::{LogSummary, NodeInfo};
use crate::error::{ReflexError, ReflexResult};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Latest value published on a topic, tagged with a monotonically increasing sequence
struct Latest<T> {
    seq: u64,
    value: Option<T>,
}

/// Shared slot behind every Hub handle of one topic
struct TopicSlot<T> {
    latest: Mutex<Latest<T>>,
}

struct RegisteredTopic {
    type_name: &'static str,
    slot: Arc<dyn Any + Send + Sync>,
}

static TOPIC_REGISTRY: Lazy<Mutex<HashMap<String, RegisteredTopic>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn lookup_or_register<T: Send + 'static>(topic_name: &str) -> ReflexResult<Arc<TopicSlot<T>>> {
    let mut registry = TOPIC_REGISTRY.lock();

    let entry = registry
        .entry(topic_name.to_string())
        .or_insert_with(|| RegisteredTopic {
            type_name: type_name::<T>(),
            slot: Arc::new(TopicSlot::<T> {
                latest: Mutex::new(Latest {
                    seq: 0,
                    value: None,
                }),
            }),
        });

    let registered_type = entry.type_name;
    entry.slot.clone().downcast::<TopicSlot<T>>().map_err(|_| {
        ReflexError::communication(format!(
            "Topic '{}' already carries {}, cannot open it as {}",
            topic_name,
            registered_type,
            type_name::<T>()
        ))
    })
}

/// Lock-free atomic metrics for Hub monitoring
#[derive(Debug, Default)]
struct AtomicHubMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    messages_dropped: AtomicU64,
}

impl AtomicHubMetrics {
    fn snapshot(&self) -> HubMetrics {
        HubMetrics {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_dropped: self.messages_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of a Hub handle's traffic counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubMetrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    /// Messages overwritten before this handle read them
    pub messages_dropped: u64,
}

/// Publish/subscribe handle for one named topic
pub struct Hub<T> {
    slot: Arc<TopicSlot<T>>,
    topic_name: String,
    last_seen: AtomicU64,
    metrics: Arc<AtomicHubMetrics>,
}

// Manual Clone implementation since AtomicU64 doesn't implement Clone
impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            topic_name: self.topic_name.clone(),
            last_seen: AtomicU64::new(self.last_seen.load(Ordering::Acquire)),
            metrics: self.metrics.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("topic_name", &self.topic_name)
            .field("last_seen", &self.last_seen.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Hub<T> {
    /// Open a handle on `topic_name`, registering the topic on first use
    ///
    /// A new handle only receives messages published after it was created.
    pub fn new(topic_name: &str) -> ReflexResult<Self> {
        if topic_name.is_empty() {
            return Err(ReflexError::InvalidInput(
                "Topic name must not be empty".to_string(),
            ));
        }

        let slot = lookup_or_register::<T>(topic_name)?;
        let current_seq = slot.latest.lock().seq;

        Ok(Hub {
            slot,
            topic_name: topic_name.to_string(),
            last_seen: AtomicU64::new(current_seq),
            metrics: Arc::new(AtomicHubMetrics::default()),
        })
    }

    /// Publish a message, replacing any message still pending on the topic
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>)
    where
        T: LogSummary,
    {
        match ctx {
            Some(ctx) => {
                // Summary must be taken before the message moves into the slot
                let summary = msg.log_summary();
                self.store(msg);
                ctx.log_pub_summary(&self.topic_name, &summary);
            }
            None => self.store(msg),
        }
    }

    /// Receive the newest message this handle has not seen yet
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        let last_seen = self.last_seen.load(Ordering::Acquire);
        let (seq, msg) = {
            let latest = self.slot.latest.lock();
            if latest.seq <= last_seen {
                return None;
            }
            (latest.seq, latest.value.clone()?)
        };
        self.last_seen.store(seq, Ordering::Release);

        let skipped = seq - last_seen - 1;
        if skipped > 0 {
            self.metrics
                .messages_dropped
                .fetch_add(skipped, Ordering::Relaxed);
            log::trace!(
                "Hub '{}' skipped {} stale message(s)",
                self.topic_name,
                skipped
            );
        }
        self.metrics
            .messages_received
            .fetch_add(1, Ordering::Relaxed);

        if let Some(ctx) = ctx {
            ctx.log_sub_summary(&self.topic_name, &msg.log_summary());
        }

        Some(msg)
    }

    /// Get current metrics snapshot (lock-free)
    pub fn get_metrics(&self) -> HubMetrics {
        self.metrics.snapshot()
    }

    /// Get the topic name for this Hub
    pub fn get_topic_name(&self) -> &str {
        &self.topic_name
    }

    fn store(&self, msg: T) {
        {
            let mut latest = self.slot.latest.lock();
            latest.seq += 1;
            latest.value = Some(msg);
        }
        self.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
    }
}
