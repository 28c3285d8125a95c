//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for plan generation
//! and plan chat.
//!
//! Template loading chain:
//! 1. `~/.config/fitplan/prompts/{name}.pmt` (user override)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{PromptError, PromptLoader};
