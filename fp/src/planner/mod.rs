//! Planner - orchestrates plan generation and follow-up questions
//!
//! The planner is the only component with sequencing logic: it reads a
//! request, renders the matching prompt, calls the completion client,
//! and updates the session state. Each operation runs to completion
//! before the next is accepted; there are no overlapping calls within a
//! session.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Plan, PlanRequest, RequestError};
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message, StopReason};
use crate::prompts::{PromptError, PromptLoader};
use crate::session::{ChatTurn, SessionError, SessionState};

/// Errors from planner operations
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid plan request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("Prompt error: {0}")]
    Template(#[from] PromptError),

    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("The model returned an empty response")]
    EmptyResponse,
}

/// Orchestrates one user's planning session
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    session: SessionState,
    max_tokens: u32,
}

impl Planner {
    /// Create a planner with an empty session
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, max_tokens: u32) -> Self {
        Self {
            llm,
            prompts,
            session: SessionState::new(),
            max_tokens,
        }
    }

    /// Read access to the session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Generate a plan from the given request
    ///
    /// On success the session's plan is replaced and its transcript
    /// reset. On any failure the session is left exactly as it was -
    /// a prior plan and its transcript survive a failed regeneration.
    pub async fn generate_plan(&mut self, request: &PlanRequest) -> Result<Plan, PlannerError> {
        debug!("generate_plan: called");
        request.validate()?;

        let prompt = self.prompts.render_plan(request)?;
        let response = self.llm.complete(self.completion_request(prompt)).await?;

        if response.stop_reason == StopReason::MaxTokens {
            warn!("generate_plan: response truncated at max tokens");
        }

        let text = response.content.ok_or(PlannerError::EmptyResponse)?;
        let plan = Plan::new(text);
        self.session.set_plan(plan.clone());
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "generate_plan: plan stored"
        );
        Ok(plan)
    }

    /// Answer a follow-up question against the current plan
    ///
    /// Every accepted question yields exactly one assistant turn: on a
    /// completion failure the error text itself becomes the assistant
    /// turn, keeping the transcript continuous. The returned string is
    /// whatever was appended.
    pub async fn ask(&mut self, question: &str) -> Result<String, PlannerError> {
        debug!("ask: called");
        let plan_text = match self.session.plan() {
            Some(plan) => plan.text().to_string(),
            None => return Err(SessionError::NoPlan.into()),
        };

        // Render before recording the user turn so an internal template
        // error cannot leave a question without an answer.
        let prompt = self.prompts.render_chat(&plan_text, question)?;

        self.session.append_turn(ChatTurn::user(question))?;

        let answer = match self.llm.complete(self.completion_request(prompt)).await {
            Ok(response) => response
                .content
                .unwrap_or_else(|| format!("Error: {}", PlannerError::EmptyResponse)),
            Err(e) => {
                debug!(error = %e, "ask: completion failed, answering with error text");
                format!("Error: {}", e)
            }
        };

        self.session.append_turn(ChatTurn::assistant(answer.clone()))?;
        Ok(answer)
    }

    fn completion_request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            system_prompt: String::new(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.max_tokens,
        }
    }
}
