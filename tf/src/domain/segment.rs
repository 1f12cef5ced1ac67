//! Segment - one bookable travel unit
//!
//! A segment is the atomic unit of travel state: one flight leg, one hotel
//! stay, one transfer. It tracks the search parameters gathered so far, the
//! candidate offers returned by a search provider, and the user's selection.
//! One type serves every slot kind; `needs_search` checks both requirement
//! shapes instead of subclassing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::PlanError;

/// Segment status in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStatus {
    /// Gathering requirements, no search issued yet
    #[default]
    Pending,
    /// Search in flight with an external provider
    Searching,
    /// Options returned, awaiting a user choice
    Selecting,
    /// Option chosen and locked in
    Confirmed,
}

impl std::fmt::Display for SegmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Searching => write!(f, "searching"),
            Self::Selecting => write!(f, "selecting"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// One bookable unit within a slot
///
/// Offers in `options_pool` and `selected_option` are opaque maps from the
/// search provider; the core imposes no schema on them. Fields the core
/// does not interpret pass through `extra` untouched, so forward-compatible
/// payloads from external APIs survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Segment {
    /// Current status
    #[serde(default)]
    pub status: SegmentStatus,

    /// Search parameters gathered so far (origin, destination, check_in, ...)
    #[serde(default)]
    pub requirements: Map<String, Value>,

    /// Candidate offers from the search provider, in provider order
    #[serde(default)]
    pub options_pool: Vec<Value>,

    /// The chosen offer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<Value>,

    /// Passthrough fields the core does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    /// Create a fresh pending segment with no requirements
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a segment from externally supplied parts, validating the
    /// hard invariants
    ///
    /// Fails when `confirmed` arrives without a selection or `selecting`
    /// arrives with an empty pool. This is the strict boundary for
    /// replacement payloads from external collaborators; runtime drift is
    /// instead repaired by [`crate::slots::ensure_segment_state`].
    pub fn try_new(
        status: SegmentStatus,
        requirements: Map<String, Value>,
        options_pool: Vec<Value>,
        selected_option: Option<Value>,
    ) -> Result<Self, PlanError> {
        if status == SegmentStatus::Confirmed && selected_option.is_none() {
            return Err(PlanError::InvalidSegment(
                "confirmed segment has no selected option".to_string(),
            ));
        }
        if status == SegmentStatus::Selecting && options_pool.is_empty() {
            return Err(PlanError::InvalidSegment(
                "selecting segment has an empty options pool".to_string(),
            ));
        }
        Ok(Self {
            status,
            requirements,
            options_pool,
            selected_option,
            extra: Map::new(),
        })
    }

    /// Check whether this segment is done: confirmed with a selection
    pub fn is_complete(&self) -> bool {
        self.status == SegmentStatus::Confirmed && self.selected_option.is_some()
    }

    /// Check whether a requirement is present with a usable value
    ///
    /// Null and empty/whitespace strings count as missing; extractors
    /// routinely emit them for fields they could not fill.
    pub fn has_requirement(&self, key: &str) -> bool {
        match self.requirements.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }

    /// Check whether this segment is ready for a search to be issued
    ///
    /// False once confirmed or once options exist. Otherwise true iff the
    /// requirements satisfy either the flight/transport shape
    /// (origin + destination + date or departure_date) or the accommodation
    /// shape (location + check_in + check_out).
    pub fn needs_search(&self) -> bool {
        if self.status == SegmentStatus::Confirmed || !self.options_pool.is_empty() {
            return false;
        }
        let flight_shape = self.has_requirement("origin")
            && self.has_requirement("destination")
            && (self.has_requirement("date") || self.has_requirement("departure_date"));
        let stay_shape = self.has_requirement("location")
            && self.has_requirement("check_in")
            && self.has_requirement("check_out");
        flight_shape || stay_shape
    }
}
