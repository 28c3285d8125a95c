//! Integration tests for the fp binary
//!
//! These exercise the CLI surface that runs before any network call:
//! startup validation, config loading, and request-file handling.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Write a config that resolves its key from a controllable env var and
/// a file path inside the temp dir.
fn write_config(dir: &TempDir, api_key_env: &str, provider: &str) -> std::path::PathBuf {
    let key_file = dir.path().join("api_key");
    let config_path = dir.path().join("fitplan.yml");
    fs::write(
        &config_path,
        format!(
            "llm:\n  provider: {}\n  api-key-env: {}\n  api-key-file: {}\n",
            provider,
            api_key_env,
            key_file.display()
        ),
    )
    .expect("Failed to write config");
    config_path
}

// =============================================================================
// Startup validation
// =============================================================================

#[test]
fn test_missing_credential_fails_fast() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "FITPLAN_TEST_KEY_UNSET_98765", "groq");

    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "plan"])
        .env_remove("FITPLAN_TEST_KEY_UNSET_98765")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FITPLAN_TEST_KEY_UNSET_98765"));
}

#[test]
fn test_credential_from_key_file_passes_validation() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "FITPLAN_TEST_KEY_UNSET_98765", "groq");
    fs::write(dir.path().join("api_key"), "gsk_test\n").expect("Failed to write key file");

    // Credential resolves, so startup proceeds past validation and the
    // next failure is the bad request file, not the missing key.
    let bad_request = dir.path().join("request.yml");
    fs::write(&bad_request, "workout_type: [not, a, string\n").expect("Failed to write request");

    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "plan", "--request", bad_request.to_str().unwrap()])
        .env_remove("FITPLAN_TEST_KEY_UNSET_98765")
        .assert()
        .failure()
        .stderr(predicate::str::contains("request file").and(predicate::str::contains("FITPLAN_TEST_KEY_UNSET_98765").not()));
}

// =============================================================================
// Request file handling
// =============================================================================

#[test]
fn test_request_file_out_of_range_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "FITPLAN_TEST_KEY_55555", "groq");

    let request = dir.path().join("request.yml");
    fs::write(
        &request,
        "workout_type: Weight Loss\ndiet_type: Indian\ncurrent_weight: 500.0\n\
         target_weight: 68.0\nage: 30\ngender: Female\nnumber_of_weeks: 4\n",
    )
    .expect("Failed to write request");

    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "plan", "--request", request.to_str().unwrap()])
        .env("FITPLAN_TEST_KEY_55555", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be between"));
}

#[test]
fn test_request_file_missing_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "FITPLAN_TEST_KEY_55555", "groq");

    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "plan", "--request", "/nonexistent/request.yml"])
        .env("FITPLAN_TEST_KEY_55555", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read request file"));
}

// =============================================================================
// Config handling
// =============================================================================

#[test]
fn test_unknown_provider_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "FITPLAN_TEST_KEY_55555", "openrouter");

    let request = dir.path().join("request.yml");
    fs::write(
        &request,
        "workout_type: Weight Loss\ndiet_type: Indian\ncurrent_weight: 75.0\n\
         target_weight: 68.0\nage: 30\ngender: Female\nnumber_of_weeks: 4\n",
    )
    .expect("Failed to write request");

    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["--config", config.to_str().unwrap(), "plan", "--request", request.to_str().unwrap()])
        .env("FITPLAN_TEST_KEY_55555", "gsk_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown LLM provider"));
}

// =============================================================================
// CLI surface
// =============================================================================

#[test]
fn test_help_lists_plan_subcommand() {
    Command::cargo_bin("fp")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_plan_help_lists_request_fields() {
    Command::cargo_bin("fp")
        .expect("binary exists")
        .args(["plan", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--workout-type")
                .and(predicate::str::contains("--number-of-weeks"))
                .and(predicate::str::contains("--request")),
        );
}
