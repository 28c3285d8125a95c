//! Prompt Loader
//!
//! Loads prompt templates from the user override directory or falls back
//! to embedded defaults, then renders them with Handlebars.

use std::path::PathBuf;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::embedded;
use crate::domain::PlanRequest;

/// Errors from loading or rendering prompt templates
///
/// A `Render` error in normal operation means a template references a
/// parameter the context does not supply - a programming error (or a
/// broken user override), so it is propagated rather than recovered.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt template not found: {0}")]
    NotFound(String),

    #[error("Failed to read prompt {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        source: handlebars::RenderError,
    },
}

/// Context for the `chat` template
#[derive(Debug, Serialize)]
struct ChatContext<'a> {
    plan: &'a str,
    question: &'a str,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (`~/.config/fitplan/prompts/`)
    user_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks the user override directory first
    pub fn new() -> Self {
        let user_dir = dirs::config_dir().map(|d| d.join("fitplan").join("prompts"));
        Self::with_overrides(user_dir)
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self::with_overrides(None)
    }

    /// Create a loader with an explicit override directory
    pub fn with_overrides(user_dir: Option<PathBuf>) -> Self {
        debug!(?user_dir, "PromptLoader::with_overrides: called");
        let mut hbs = Handlebars::new();
        // Missing parameters must fail loudly, not render as empty text
        hbs.set_strict_mode(true);
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);

        Self {
            hbs,
            user_dir: user_dir.filter(|d| d.exists()),
        }
    }

    /// Load a template by name
    ///
    /// Checks the user override directory, then the embedded fallback.
    fn load_template(&self, name: &str) -> Result<String, PromptError> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found user override");
                return std::fs::read_to_string(&path).map_err(|source| PromptError::Io { path, source });
            }
        }

        embedded::get_embedded(name)
            .map(ToString::to_string)
            .ok_or_else(|| PromptError::NotFound(name.to_string()))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, name: &str, context: &C) -> Result<String, PromptError> {
        debug!(%name, "PromptLoader::render: called");
        let template = self.load_template(name)?;

        self.hbs
            .render_template(&template, context)
            .map_err(|source| PromptError::Render {
                name: name.to_string(),
                source,
            })
    }

    /// Render the plan generation prompt from a request
    pub fn render_plan(&self, request: &PlanRequest) -> Result<String, PromptError> {
        self.render("plan", request)
    }

    /// Render the follow-up question prompt
    pub fn render_chat(&self, plan: &str, question: &str) -> Result<String, PromptError> {
        self.render("chat", &ChatContext { plan, question })
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::new()
    }
}
