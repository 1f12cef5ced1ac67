//! Domain types for trip planning
//!
//! The data model the rest of the crate operates on: segments, slots,
//! trip plans, the workflow funnel, and extracted-action types.

pub mod action;
pub mod error;
pub mod segment;
pub mod slot;
pub mod trip;
pub mod workflow;

pub use action::{ActionType, next_step_for_action};
pub use error::PlanError;
pub use segment::{Segment, SegmentStatus};
pub use slot::SlotKind;
pub use trip::{TravelMode, TripPlan, TripType};
pub use workflow::{WorkflowState, WorkflowStep, can_transition};
