//! Workflow transition history
//!
//! Every accepted workflow transition is published to a broadcast bus,
//! best-effort and non-blocking. Consumers (the JSONL logger, analytics
//! forwarders) subscribe; a missing consumer never slows down or fails the
//! primary state write.

pub mod bus;
pub mod logger;
pub mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, HistoryBus};
pub use logger::{HistoryLogger, spawn_history_logger};
pub use types::TransitionRecord;

use std::sync::Arc;

/// Create a shared history bus with default capacity
pub fn create_history_bus() -> Arc<HistoryBus> {
    Arc::new(HistoryBus::with_default_capacity())
}
