//! Domain errors
//!
//! Typed faults for the slot registry and segment construction. Soft
//! inconsistencies (a confirmed segment without a selection, a selecting
//! segment with an empty pool) are NOT errors - the reconciler repairs
//! them in place. These variants cover true faults: the conversational
//! controller acting on stale information, or malformed external input.

use thiserror::Error;

/// Errors from trip-plan operations
#[derive(Debug, Error)]
pub enum PlanError {
    /// Slot name did not resolve to any known slot kind
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// Slot exists but holds no segments to act on
    #[error("No segments in slot '{0}'")]
    EmptySlot(String),

    /// Segment index past the end of the slot (and creation not requested)
    #[error("Segment index {index} out of range for slot '{slot}' ({len} segments)")]
    SegmentIndexOutOfRange { slot: String, index: usize, len: usize },

    /// Option index past the end of the segment's options pool
    #[error("Option index {index} out of range ({len} options available)")]
    OptionIndexOutOfRange { index: usize, len: usize },

    /// Segment construction violated an invariant
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),
}
