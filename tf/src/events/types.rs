//! Transition record types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sessionstore::now_ms;
use uuid::Uuid;

use crate::domain::WorkflowStep;

/// One accepted workflow transition
///
/// Self-loops count: repeating an action within a phase is an accepted
/// transition and lands in the history like any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique record ID
    pub id: String,

    /// Session whose workflow transitioned
    pub session_id: String,

    /// Acting user, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Step before the transition
    pub from_step: WorkflowStep,

    /// Step after the transition
    pub to_step: WorkflowStep,

    /// Transition timestamp (Unix milliseconds)
    pub timestamp: i64,

    /// Optional small payload for analytics (action type, slot name, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl TransitionRecord {
    /// Create a record with a generated ID and current timestamp
    pub fn new(
        session_id: impl Into<String>,
        user_id: Option<String>,
        from_step: WorkflowStep,
        to_step: WorkflowStep,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            session_id: session_id.into(),
            user_id,
            from_step,
            to_step,
            timestamp: now_ms(),
            payload: None,
        }
    }

    /// Attach an analytics payload
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_new_fills_id_and_timestamp() {
        let record = TransitionRecord::new("sess-1", None, WorkflowStep::Planning, WorkflowStep::Searching);
        assert!(!record.id.is_empty());
        assert!(record.timestamp > 0);
        assert_eq!(record.session_id, "sess-1");
        assert!(record.user_id.is_none());
    }

    #[test]
    fn test_record_serde_step_names() {
        let record = TransitionRecord::new(
            "sess-1",
            Some("user-9".to_string()),
            WorkflowStep::Searching,
            WorkflowStep::Selecting,
        )
        .with_payload(json!({"action": "CALL_SEARCH"}));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["from_step"], "searching");
        assert_eq!(value["to_step"], "selecting");
        assert_eq!(value["user_id"], "user-9");
        assert_eq!(value["payload"]["action"], "CALL_SEARCH");

        let back: TransitionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let record = TransitionRecord::new("sess-1", None, WorkflowStep::Planning, WorkflowStep::Planning);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("user_id"));
        assert!(!json.contains("payload"));
    }
}
