//! History bus - pub/sub for workflow transitions
//!
//! Built on tokio broadcast channels. Emitting is fire-and-forget: the
//! state write that triggered the transition must never block on, or fail
//! because of, history delivery.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::TransitionRecord;

/// Default channel capacity (records)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1_024;

/// Broadcast bus for accepted workflow transitions
pub struct HistoryBus {
    tx: broadcast::Sender<TransitionRecord>,
}

impl HistoryBus {
    /// Create a bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "HistoryBus::new: creating bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Publish a transition record to all subscribers
    ///
    /// Fire-and-forget: with no subscribers the record is dropped; when
    /// the channel is full the oldest records are dropped.
    pub fn emit(&self, record: TransitionRecord) {
        debug!(
            session_id = %record.session_id,
            from = %record.from_step,
            to = %record.to_step,
            "HistoryBus::emit"
        );
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(record);
    }

    /// Subscribe to transitions emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<TransitionRecord> {
        debug!("HistoryBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for HistoryBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
