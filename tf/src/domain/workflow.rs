//! Workflow funnel state machine
//!
//! The conversation's global phase moves through a linear funnel:
//! planning -> searching -> selecting -> summary -> booking -> done.
//! Every intermediate state self-loops so repeated actions within a phase
//! are valid; `done` only self-loops. Anything else is rejected, and the
//! caller keeps the last known-good step rather than erroring - a confused
//! controller asking to regress must not derail the conversation.

use serde::{Deserialize, Serialize};
use sessionstore::now_ms;
use tracing::debug;

/// Global conversation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Gathering trip requirements
    #[default]
    Planning,
    /// Searches issued, waiting for options
    Searching,
    /// Options presented, awaiting user choices
    Selecting,
    /// Trip summary shown for review
    Summary,
    /// Booking in progress
    Booking,
    /// Funnel finished
    Done,
}

impl WorkflowStep {
    /// Parse an external step string, defaulting unknown values to planning
    ///
    /// Case-insensitive. Unknown strings map to the funnel entry rather
    /// than propagating untyped input through the core.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "planning" => Self::Planning,
            "searching" => Self::Searching,
            "selecting" => Self::Selecting,
            "summary" => Self::Summary,
            "booking" => Self::Booking,
            "done" => Self::Done,
            other => {
                debug!(step = %other, "Unknown workflow step, defaulting to planning");
                Self::Planning
            }
        }
    }

    /// Steps this step may transition to (self-loop included)
    pub fn allowed_next(self) -> &'static [WorkflowStep] {
        match self {
            Self::Planning => &[Self::Planning, Self::Searching],
            Self::Searching => &[Self::Searching, Self::Selecting],
            Self::Selecting => &[Self::Selecting, Self::Summary],
            Self::Summary => &[Self::Summary, Self::Booking],
            Self::Booking => &[Self::Booking, Self::Done],
            Self::Done => &[Self::Done],
        }
    }

    /// Check the transition table
    pub fn can_advance_to(self, to: WorkflowStep) -> bool {
        self.allowed_next().contains(&to)
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::Searching => write!(f, "searching"),
            Self::Selecting => write!(f, "selecting"),
            Self::Summary => write!(f, "summary"),
            Self::Booking => write!(f, "booking"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// String-level transition check for callers holding raw step names
///
/// Case-insensitive; an unknown `from` gets planning's allowed set.
pub fn can_transition(from: &str, to: &str) -> bool {
    WorkflowStep::parse_lenient(from).can_advance_to(WorkflowStep::parse_lenient(to))
}

/// Per-session workflow record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Current funnel step
    pub step: WorkflowStep,

    /// Whether the trip plan's required slots are all confirmed
    pub slots_complete: bool,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl WorkflowState {
    /// Fresh state at the funnel entry
    pub fn new() -> Self {
        let now = now_ms();
        Self {
            step: WorkflowStep::Planning,
            slots_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the step
    pub fn set_step(&mut self, step: WorkflowStep) {
        self.step = step;
        self.updated_at = now_ms();
    }

    /// Update the completeness flag
    pub fn set_slots_complete(&mut self, complete: bool) {
        self.slots_complete = complete;
        self.updated_at = now_ms();
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
