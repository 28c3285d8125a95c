//! Interactive front end
//!
//! One process hosts one session: form, generation, chat loop. Each
//! action runs to completion before the next is read, so there is never
//! more than one in-flight completion call per session.

mod session;
mod view;

pub use session::{FormDefaults, ReplSession};
pub use view::{OutputMode, PlanView};

use eyre::Result;

use crate::config::Config;
use crate::domain::PlanRequest;
use crate::llm::create_client;
use crate::planner::Planner;
use crate::prompts::PromptLoader;

/// Run an interactive planning session
///
/// This is the main entry point for `fp plan`.
pub async fn run_interactive(
    config: &Config,
    request: Option<PlanRequest>,
    supplied: FormDefaults,
    plain: bool,
) -> Result<()> {
    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;

    let planner = Planner::new(llm, PromptLoader::new(), config.llm.max_tokens);
    let mut session = ReplSession::new(planner, PlanView::new(OutputMode::from_plain_flag(plain)));
    session.run(request, supplied).await
}
