//! WorkflowManager - session-keyed workflow and trip-plan persistence
//!
//! The manager is the write path for per-session state. It owns nothing
//! itself: the store is injected (single active writer per session,
//! enforced by the host), and accepted transitions are published
//! to the history bus fire-and-forget. A rejected transition is not an
//! error - the stored step is retained and the rejection logged, so a
//! confused controller cannot derail the conversation.

use std::sync::Arc;

use serde_json::Value;
use sessionstore::{SessionStore, StoreError};
use thiserror::Error;
use tracing::debug;

use crate::domain::{ActionType, TripPlan, WorkflowState, WorkflowStep, next_step_for_action};
use crate::events::{HistoryBus, TransitionRecord};

/// Store collection holding workflow states
pub const WORKFLOW_COLLECTION: &str = "workflow";

/// Store collection holding trip plans
pub const PLANS_COLLECTION: &str = "plans";

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Facade over the session store for workflow and plan state
pub struct WorkflowManager {
    store: Arc<dyn SessionStore>,
    history: Option<Arc<HistoryBus>>,
}

impl WorkflowManager {
    /// Create a manager without a history sink
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, history: None }
    }

    /// Create a manager publishing accepted transitions to a history bus
    pub fn with_history(store: Arc<dyn SessionStore>, history: Arc<HistoryBus>) -> Self {
        Self {
            store,
            history: Some(history),
        }
    }

    // === Workflow state ===

    /// Get the workflow state for a session, if any
    pub async fn workflow_state(&self, session_id: &str) -> Result<Option<WorkflowState>, StateError> {
        debug!(%session_id, "workflow_state: called");
        match self.store.get(WORKFLOW_COLLECTION, session_id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Request a workflow step for a session
    ///
    /// Validates against the transition table. On acceptance the new state
    /// is persisted and a transition record is emitted; on rejection the
    /// stored step is silently retained (logged at debug) and returned
    /// unchanged. A session with no state starts at planning.
    pub async fn set_step(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        requested: WorkflowStep,
    ) -> Result<WorkflowState, StateError> {
        debug!(%session_id, %requested, "set_step: called");
        let mut state = self
            .workflow_state(session_id)
            .await?
            .unwrap_or_else(WorkflowState::new);
        let current = state.step;

        if !current.can_advance_to(requested) {
            debug!(
                %session_id,
                from = %current,
                to = %requested,
                "set_step: transition rejected, retaining current step"
            );
            // Persist anyway so a first touch creates the session record
            self.persist_workflow(session_id, &state).await?;
            return Ok(state);
        }

        state.set_step(requested);
        self.persist_workflow(session_id, &state).await?;

        if let Some(history) = &self.history {
            history.emit(TransitionRecord::new(
                session_id,
                user_id.map(str::to_string),
                current,
                requested,
            ));
        }

        Ok(state)
    }

    /// Decode a controller action and advance the workflow it suggests
    ///
    /// Actions with no suggested step (BATCH) leave the state untouched.
    pub async fn apply_action(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        action: ActionType,
    ) -> Result<WorkflowState, StateError> {
        debug!(%session_id, %action, "apply_action: called");
        let state = self
            .workflow_state(session_id)
            .await?
            .unwrap_or_else(WorkflowState::new);

        match next_step_for_action(action, state.step) {
            Some(step) => self.set_step(session_id, user_id, step).await,
            None => {
                debug!(%session_id, %action, "apply_action: no suggested step");
                Ok(state)
            }
        }
    }

    /// Update the slots-complete flag on a session's workflow state
    pub async fn set_slots_complete(&self, session_id: &str, complete: bool) -> Result<WorkflowState, StateError> {
        debug!(%session_id, complete, "set_slots_complete: called");
        let mut state = self
            .workflow_state(session_id)
            .await?
            .unwrap_or_else(WorkflowState::new);
        state.set_slots_complete(complete);
        self.persist_workflow(session_id, &state).await?;
        Ok(state)
    }

    /// Remove a session's workflow state entirely (trip reset)
    pub async fn clear_workflow(&self, session_id: &str) -> Result<bool, StateError> {
        debug!(%session_id, "clear_workflow: called");
        Ok(self.store.delete(WORKFLOW_COLLECTION, session_id).await?)
    }

    async fn persist_workflow(&self, session_id: &str, state: &WorkflowState) -> Result<(), StateError> {
        let value: Value = serde_json::to_value(state)?;
        self.store.set(WORKFLOW_COLLECTION, session_id, value).await?;
        Ok(())
    }

    // === Trip plans ===

    /// Get the trip plan for a session, if any
    pub async fn trip_plan(&self, session_id: &str) -> Result<Option<TripPlan>, StateError> {
        debug!(%session_id, "trip_plan: called");
        match self.store.get(PLANS_COLLECTION, session_id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Persist a session's trip plan
    pub async fn save_trip_plan(&self, session_id: &str, plan: &TripPlan) -> Result<(), StateError> {
        debug!(%session_id, "save_trip_plan: called");
        let value = serde_json::to_value(plan)?;
        self.store.set(PLANS_COLLECTION, session_id, value).await?;
        Ok(())
    }

    /// Remove a session's trip plan
    pub async fn clear_trip_plan(&self, session_id: &str) -> Result<bool, StateError> {
        debug!(%session_id, "clear_trip_plan: called");
        Ok(self.store.delete(PLANS_COLLECTION, session_id).await?)
    }

    /// List sessions with workflow state
    pub async fn session_ids(&self) -> Result<Vec<String>, StateError> {
        Ok(self.store.session_ids(WORKFLOW_COLLECTION).await?)
    }
}
