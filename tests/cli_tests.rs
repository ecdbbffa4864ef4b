//! Integration tests for the somsov CLI
//!
//! These tests run the actual binary against the scripted agent transport.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DATA: &str = "Brand,Sales_Volume,Sales_Value,Media_Spend,Period
Brand A,7500000,7500000,2000000,March 2024
Brand B,5000000,5000000,2000000,March 2024
Brand C,3500000,3500000,500000,March 2024
";

/// Binary isolated from the user's config, .env and environment
fn somsov_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("somsov").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("SOMSOV_AGENT_ENDPOINT")
        .env_remove("SOMSOV_API_KEY");
    cmd
}

fn write_file(home: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = home.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    somsov_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SOM/SOV market analysis"));
}

// ============================================================================
// Agents
// ============================================================================

#[test]
fn test_agents_lists_every_role() {
    let home = TempDir::new().unwrap();
    somsov_cmd(&home)
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("6971045dd6d0dcaec11187d7"))
        .stdout(predicate::str::contains("strategic-advisor"))
        .stdout(predicate::str::contains("used by analyze"));
}

#[test]
fn test_ask_unknown_role_fails() {
    let home = TempDir::new().unwrap();
    somsov_cmd(&home)
        .args(["ask", "--role", "oracle", "--agent", "mock", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown agent role 'oracle'"))
        .stderr(predicate::str::contains("somsov agents"));
}

#[test]
fn test_ask_mock_prints_normalized_response() {
    let home = TempDir::new().unwrap();
    somsov_cmd(&home)
        .args(["ask", "--role", "coordinator", "--agent", "mock", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"));
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_preview_shows_cells_and_missing_columns() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "partial.csv", "Brand,Sales_Value\nBrand A,100\n");

    somsov_cmd(&home)
        .arg("preview")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Brand | Sales_Value"))
        .stdout(predicate::str::contains("Brand A | 100"))
        .stdout(predicate::str::contains(
            "Missing: Sales_Volume, Media_Spend, Period",
        ));
}

#[test]
fn test_preview_complete_file() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "market.csv", DATA);

    somsov_cmd(&home)
        .arg("preview")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("All expected columns present"));
}

#[test]
fn test_preview_rejects_unsupported_extension() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "notes.pdf", DATA);

    somsov_cmd(&home)
        .arg("preview")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type 'pdf'"))
        .stderr(predicate::str::contains("Fix:"));
}

// ============================================================================
// Analyze
// ============================================================================

#[test]
fn test_analyze_empty_file_fails_before_any_call() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "empty.csv", "  \n\n");

    somsov_cmd(&home)
        .args(["analyze", "--agent", "mock", "--no-delay"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide market data"));
}

#[test]
fn test_analyze_with_mock_agent() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "market.csv", DATA);

    somsov_cmd(&home)
        .args(["analyze", "--agent", "mock", "--no-delay"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validating Data"))
        .stdout(predicate::str::contains("Analysis complete"))
        .stdout(predicate::str::contains("Data Quality:"))
        .stdout(predicate::str::contains("Brand B"));
}

#[test]
fn test_analyze_json_output() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "market.csv", DATA);

    let output = somsov_cmd(&home)
        .args(["analyze", "--agent", "mock", "--no-delay", "--json"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["response"]["status"], "success");
    assert_eq!(
        value["response"]["result"]["market_metrics"]["efficiency_leader"],
        "Brand B"
    );
}

#[test]
fn test_analyze_unknown_transport() {
    let home = TempDir::new().unwrap();
    let file = write_file(&home, "market.csv", DATA);

    somsov_cmd(&home)
        .args(["analyze", "--agent", "carrier-pigeon"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown agent transport"));
}

#[test]
fn test_analyze_missing_file() {
    let home = TempDir::new().unwrap();

    somsov_cmd(&home)
        .args(["analyze", "--agent", "mock", "--no-delay", "nope.csv"])
        .assert()
        .failure();
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_path_under_config_home() {
    let home = TempDir::new().unwrap();

    somsov_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("somsov"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let home = TempDir::new().unwrap();

    somsov_cmd(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    somsov_cmd(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    somsov_cmd(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_show_masks_api_key() {
    let home = TempDir::new().unwrap();

    somsov_cmd(&home)
        .env("SOMSOV_API_KEY", "sk-live-abcdefghijklmnop")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000/api/agent"))
        .stdout(predicate::str::contains("abcdefghijklmnop").not());
}
