//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Plan generation prompt (diet + workout tables)
pub const PLAN: &str = include_str!("../../prompts/plan.pmt");

/// Follow-up question prompt
pub const CHAT: &str = include_str!("../../prompts/chat.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "plan" => Some(PLAN),
        "chat" => Some(CHAT),
        _ => None,
    }
}
