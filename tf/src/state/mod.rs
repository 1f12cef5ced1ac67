//! Session-keyed state management
//!
//! Persists workflow states and trip plans through an injected
//! `SessionStore` and applies the workflow transition rules on write.

pub mod manager;

pub use manager::{PLANS_COLLECTION, StateError, WORKFLOW_COLLECTION, WorkflowManager};
