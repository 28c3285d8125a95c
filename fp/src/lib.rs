//! Fitplan - LLM-backed fitness and diet planning sessions
//!
//! Fitplan collects a handful of personal fitness parameters, sends them
//! as a templated prompt to a hosted completion API, renders the returned
//! markdown plan in the terminal, and answers follow-up questions against
//! that plan in a chat loop. Nothing persists across process restarts;
//! each process is one isolated session.
//!
//! # Modules
//!
//! - [`llm`] - Completion client trait and Groq implementation
//! - [`prompts`] - Handlebars templates for plan generation and chat
//! - [`domain`] - PlanRequest, Gender, Plan
//! - [`session`] - Per-session plan and transcript state
//! - [`planner`] - Orchestration of generate/ask operations
//! - [`repl`] - Interactive form and chat loop
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use domain::{Gender, Plan, PlanRequest, RequestError};
pub use llm::{CompletionRequest, CompletionResponse, GroqClient, LlmClient, LlmError, Message, Role, create_client};
pub use planner::{Planner, PlannerError};
pub use prompts::{PromptError, PromptLoader};
pub use session::{ChatTurn, SessionError, SessionState};
