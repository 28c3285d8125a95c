//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Gender;

/// Fitplan - LLM-backed fitness and diet planning sessions
#[derive(Parser)]
#[command(name = "fp", version, about = "Generate a personal fitness and diet plan, then chat about it")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; defaults to `plan`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive planning session
    Plan {
        /// Workout type, e.g. "Weight Loss" or "Muscle Gain"
        #[arg(long)]
        workout_type: Option<String>,

        /// Diet type, e.g. "Indian" or "Mediterranean"
        #[arg(long)]
        diet_type: Option<String>,

        /// Current body weight in kg (30-200)
        #[arg(long)]
        current_weight: Option<f64>,

        /// Target weight in kg (30-200)
        #[arg(long)]
        target_weight: Option<f64>,

        /// Dietary restrictions
        #[arg(long)]
        dietary_restrictions: Option<String>,

        /// Health conditions
        #[arg(long)]
        health_conditions: Option<String>,

        /// Age in years (10-100)
        #[arg(long)]
        age: Option<u32>,

        /// Gender
        #[arg(long, value_enum)]
        gender: Option<Gender>,

        /// Plan horizon in weeks (1-12)
        #[arg(long)]
        number_of_weeks: Option<u32>,

        /// Additional comments for the planner
        #[arg(long)]
        comments: Option<String>,

        /// Read the full request from a YAML file and skip the form
        #[arg(long, value_name = "FILE", conflicts_with_all = [
            "workout_type", "diet_type", "current_weight", "target_weight",
            "dietary_restrictions", "health_conditions", "age", "gender",
            "number_of_weeks", "comments",
        ])]
        request: Option<PathBuf>,

        /// Print plans as raw text instead of rendered markdown
        #[arg(long)]
        plain: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_flags() {
        let cli = Cli::parse_from([
            "fp",
            "plan",
            "--workout-type",
            "Muscle Gain",
            "--gender",
            "male",
            "--number-of-weeks",
            "4",
        ]);

        let Some(Command::Plan {
            workout_type,
            gender,
            number_of_weeks,
            request,
            ..
        }) = cli.command
        else {
            panic!("Expected plan subcommand");
        };
        assert_eq!(workout_type.as_deref(), Some("Muscle Gain"));
        assert_eq!(gender, Some(Gender::Male));
        assert_eq!(number_of_weeks, Some(4));
        assert!(request.is_none());
    }

    #[test]
    fn test_request_conflicts_with_field_flags() {
        let result = Cli::try_parse_from(["fp", "plan", "--request", "req.yml", "--age", "30"]);
        assert!(result.is_err());
    }
}
