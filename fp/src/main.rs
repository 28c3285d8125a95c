//! Fitplan - LLM-backed fitness and diet planner
//!
//! CLI entry point: resolves configuration and credentials, then hands
//! off to the interactive session.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use fitplan::cli::{Cli, Command};
use fitplan::config::Config;
use fitplan::domain::PlanRequest;
use fitplan::repl::{self, FormDefaults};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // The session owns the terminal, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("fitplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

/// Load and validate a request file for `--request`
fn load_request(path: &Path) -> Result<PlanRequest> {
    let content = fs::read_to_string(path).context(format!("Failed to read request file {}", path.display()))?;

    let request: PlanRequest =
        serde_yaml::from_str(&content).context(format!("Failed to parse request file {}", path.display()))?;

    request
        .validate()
        .map_err(|e| eyre::eyre!("Invalid request file {}: {}", path.display(), e))?;

    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Fold a local .env file into the environment before anything reads it
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Fitplan loaded config: model={}", config.llm.model);

    // Missing credentials halt here, before any prompt or network call
    config.validate()?;

    debug!(command = ?cli.command, "main: dispatching command");
    let command = cli.command.unwrap_or(Command::Plan {
        workout_type: None,
        diet_type: None,
        current_weight: None,
        target_weight: None,
        dietary_restrictions: None,
        health_conditions: None,
        age: None,
        gender: None,
        number_of_weeks: None,
        comments: None,
        request: None,
        plain: false,
    });

    match command {
        Command::Plan {
            workout_type,
            diet_type,
            current_weight,
            target_weight,
            dietary_restrictions,
            health_conditions,
            age,
            gender,
            number_of_weeks,
            comments,
            request,
            plain,
        } => {
            let request = request.as_deref().map(load_request).transpose()?;

            let supplied = FormDefaults {
                workout_type,
                diet_type,
                current_weight,
                target_weight,
                dietary_restrictions,
                health_conditions,
                age,
                gender,
                number_of_weeks,
                comments,
            };

            repl::run_interactive(&config, request, supplied, plain).await
        }
    }
}
