//! # Communication layer for REFLEX
//!
//! Topics are in-process, named, latest-value slots:
//!
//! - **Hub**: publish/subscribe handle. Every handle created with the same
//!   topic name shares one slot. A publish replaces whatever is pending, so a
//!   slow subscriber only ever sees the newest message.
//!
//! ```rust
//! use reflex_core::communication::Hub;
//!
//! let publisher: Hub<f32> = Hub::new("doc_example_topic").unwrap();
//! let subscriber: Hub<f32> = Hub::new("doc_example_topic").unwrap();
//!
//! publisher.send(0.5, None);
//! publisher.send(0.7, None);
//! assert_eq!(subscriber.recv(None), Some(0.7));
//! assert_eq!(subscriber.recv(None), None);
//! ```

pub mod hub;

pub use hub::{Hub, HubMetrics};
