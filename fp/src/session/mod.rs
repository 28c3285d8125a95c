//! Per-session state: the current plan and the chat transcript
//!
//! One `SessionState` belongs to exactly one interactive session and is
//! never shared across sessions. The transcript's lifetime is scoped to
//! a single plan: replacing the plan resets it, nothing else does.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Plan;
use crate::llm::Role;

/// Errors from session state operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No plan has been generated yet")]
    NoPlan,
}

/// One turn of the plan conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Mutable state for one interactive session
///
/// The transcript grows without bound within a session; it lives only in
/// memory and turns arrive at typing speed, so no eviction is applied.
#[derive(Debug, Default)]
pub struct SessionState {
    plan: Option<Plan>,
    transcript: Vec<ChatTurn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current plan, if one has been generated
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Replace the plan wholesale
    ///
    /// Clears the transcript: the conversation history belongs to the
    /// plan it was about.
    pub fn set_plan(&mut self, plan: Plan) {
        self.plan = Some(plan);
        self.transcript.clear();
    }

    /// Append a turn to the transcript
    ///
    /// Turns may only be recorded while a plan exists.
    pub fn append_turn(&mut self, turn: ChatTurn) -> Result<(), SessionError> {
        if self.plan.is_none() {
            return Err(SessionError::NoPlan);
        }
        self.transcript.push(turn);
        Ok(())
    }

    /// The conversation so far, in insertion order
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }
}
