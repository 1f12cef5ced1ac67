//! Tripflow - conversational travel-planning state core
//!
//! Tripflow tracks, per conversation, which travel components (outbound
//! flight, inbound flight, hotel, ground transport) are pending, being
//! searched, awaiting selection, or confirmed, and which global funnel
//! phase the conversation is in. Updates arrive piecemeal from an
//! LLM-driven controller and external search providers, so the core leans
//! on reconciliation over rejection: invariant breaks are repaired in
//! place and invalid phase transitions keep the last known-good step.
//!
//! # Core Concepts
//!
//! - **Segments and slots**: one segment per bookable unit, grouped into
//!   four named slots with alias-aware lookup
//! - **Funnel, not free-form**: planning -> searching -> selecting ->
//!   summary -> booking -> done, one step at a time
//! - **Repair over rejection**: external collaborators are approximate;
//!   the reconciler restores invariants instead of erroring
//! - **Corrections are loud**: slot filling reports "changed X from A to
//!   B" so the conversation can acknowledge a change of mind
//!
//! # Modules
//!
//! - [`domain`] - segments, slots, trip plans, workflow funnel, actions
//! - [`slots`] - slot registry and segment-state reconciliation
//! - [`merge`] - slot-filling merger with correction detection
//! - [`state`] - session-keyed persistence over an injected store
//! - [`events`] - transition history bus and JSONL logger
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod events;
pub mod merge;
pub mod slots;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use domain::{
    ActionType, PlanError, Segment, SegmentStatus, SlotKind, TravelMode, TripPlan, TripType,
    WorkflowState, WorkflowStep, can_transition, next_step_for_action,
};
pub use events::{HistoryBus, HistoryLogger, TransitionRecord, create_history_bus, spawn_history_logger};
pub use merge::{MergeOutcome, merge_fields};
pub use slots::{
    all_segments, all_segments_mut, ensure_segment_state, reconcile_plan, segment_at,
    set_selected, validate_segment,
};
pub use state::{StateError, WorkflowManager};
