//! SessionStore - generic session-keyed state management
//!
//! A small persistence abstraction for conversational backends: values are
//! plain JSON documents keyed by `(collection, session_id)`. The host picks
//! a backend (in-memory for tests, JSON files on disk for single-node
//! deployments) and injects it into the core; the core never assumes more
//! than a single active writer per session.

pub mod store;

pub use store::{FileStore, MemoryStore, SessionStore, StoreError};

/// Current time as Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
