//! Extracted-action types from the intent extractor
//!
//! The external extractor (LLM/NLU) emits actions as strings; the core
//! decodes them into a sum type at the boundary. Unrecognized actions
//! decode to ASK_USER - asking again is always safe, propagating untyped
//! strings is not.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::workflow::WorkflowStep;

/// Action types emitted by the intent extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Fill or correct request fields
    UpdateReq,
    /// Issue a search for a ready slot
    CallSearch,
    /// Choose an option from a segment's pool
    SelectOption,
    /// Ask the user a clarifying question
    AskUser,
    /// Several actions bundled in one turn
    Batch,
    /// Start a fresh itinerary
    CreateItinerary,
    /// User confirmed the summary, proceed to booking
    ConfirmBooking,
    /// Create the booking with the provider
    CreateBooking,
}

impl ActionType {
    /// Decode an external action string, falling back to ASK_USER
    pub fn decode(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "UPDATE_REQ" => Self::UpdateReq,
            "CALL_SEARCH" => Self::CallSearch,
            "SELECT_OPTION" => Self::SelectOption,
            "ASK_USER" => Self::AskUser,
            "BATCH" => Self::Batch,
            "CREATE_ITINERARY" => Self::CreateItinerary,
            "CONFIRM_BOOKING" => Self::ConfirmBooking,
            "CREATE_BOOKING" => Self::CreateBooking,
            other => {
                debug!(action = %other, "Unknown action type, defaulting to ASK_USER");
                Self::AskUser
            }
        }
    }

    /// Canonical wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateReq => "UPDATE_REQ",
            Self::CallSearch => "CALL_SEARCH",
            Self::SelectOption => "SELECT_OPTION",
            Self::AskUser => "ASK_USER",
            Self::Batch => "BATCH",
            Self::CreateItinerary => "CREATE_ITINERARY",
            Self::ConfirmBooking => "CONFIRM_BOOKING",
            Self::CreateBooking => "CREATE_BOOKING",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a controller action to the step it suggests next
///
/// A suggestion, not a command: the caller still validates it against the
/// transition table before applying. CALL_SEARCH is context-sensitive -
/// from `searching` it means the search completed and options are ready.
pub fn next_step_for_action(action: ActionType, current: WorkflowStep) -> Option<WorkflowStep> {
    match action {
        ActionType::CreateItinerary | ActionType::UpdateReq | ActionType::AskUser => {
            Some(WorkflowStep::Planning)
        }
        ActionType::CallSearch => match current {
            WorkflowStep::Planning => Some(WorkflowStep::Searching),
            WorkflowStep::Searching => Some(WorkflowStep::Selecting),
            _ => Some(WorkflowStep::Searching),
        },
        ActionType::SelectOption => Some(WorkflowStep::Selecting),
        ActionType::ConfirmBooking | ActionType::CreateBooking => Some(WorkflowStep::Booking),
        ActionType::Batch => None,
    }
}
