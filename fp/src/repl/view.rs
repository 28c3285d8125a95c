//! Terminal output for plans and chat answers
//!
//! Plans arrive as full markdown documents (headers, day-by-day tables)
//! and are laid out styled; chat answers are short fragments that get
//! trimmed of the blank padding models put around them. Plain mode
//! passes text through untouched for pipes and minimal terminals.

use termimad::{MadSkin, crossterm::style::Color};

use crate::domain::Plan;

/// How model markdown is written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Styled markdown
    Rich,
    /// Raw text
    Plain,
}

impl OutputMode {
    /// Mode for the `--plain` CLI flag
    pub fn from_plain_flag(plain: bool) -> Self {
        if plain { Self::Plain } else { Self::Rich }
    }
}

/// Writes plans and answers to stdout
pub struct PlanView {
    mode: OutputMode,
    skin: MadSkin,
}

impl PlanView {
    pub fn new(mode: OutputMode) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Green);
        skin.table.set_fg(Color::DarkCyan);
        skin.bold.set_fg(Color::White);
        skin.italic.set_fg(Color::Cyan);

        Self { mode, skin }
    }

    /// Write a full plan document
    pub fn print_plan(&self, plan: &Plan) {
        match self.mode {
            OutputMode::Plain => println!("{}", plan.text().trim_end()),
            OutputMode::Rich => self.skin.print_text(plan.text()),
        }
    }

    /// Write one chat answer
    pub fn print_answer(&self, answer: &str) {
        let answer = answer.trim();
        match self.mode {
            OutputMode::Plain => println!("{}", answer),
            OutputMode::Rich => self.skin.print_text(answer),
        }
    }
}
