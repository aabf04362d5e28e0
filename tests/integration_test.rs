use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;
use serde_json::{json, Value};
use tempfile::tempdir;

fn run_import(sample: &str, extra_args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_deal-warehouse");
    let sample_path = Path::new("samples").join(sample);

    let output = Command::new(binary_path)
        .arg("import")
        .arg(sample_path)
        .args(extra_args)
        .env_remove("DEAL_WAREHOUSE_DATABASE")
        .env_remove("DEAL_WAREHOUSE_LOCALE")
        .output()?;

    Ok(output)
}

fn parse_stdout(output: &Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_imports_sample_with_in_file_duplicates() -> Result<()> {
    let output = run_import("deals.csv", &[])?;

    assert!(output.status.success());
    assert_eq!(parse_stdout(&output)?, json!({
        "saved": 3,
        "duplicates": 2,
        "invalid": 0,
        "errors": [
            "Duplicate deal in file [D001] ignored.",
            "Duplicate deal in file [D002] ignored."
        ]
    }));

    Ok(())
}

#[test]
fn test_cli_reports_each_invalid_row() -> Result<()> {
    let output = run_import("invalid.csv", &[])?;

    assert!(output.status.success());

    let result = parse_stdout(&output)?;

    assert_eq!(result["saved"], 1);
    assert_eq!(result["invalid"], 5);
    assert_eq!(result["errors"][0], "Invalid deal []: Deal ID is required");
    assert_eq!(result["errors"][4], "Invalid deal [D104]: Amount must be a positive number");

    Ok(())
}

#[test]
fn test_cli_detects_deals_from_previous_runs_in_database() -> Result<()> {
    let directory = tempdir()?;
    let database = directory.path().join("deals.db");
    let database = database.to_string_lossy().into_owned();

    let first = run_import("deals.csv", &["--database", database.as_str()])?;
    let second = run_import("deals.csv", &["--database", database.as_str()])?;

    assert!(first.status.success());
    assert!(second.status.success());

    let result = parse_stdout(&second)?;

    assert_eq!(result["saved"], 0);
    assert_eq!(result["duplicates"], 5);
    assert_eq!(result["errors"][0], "Duplicate deal [D001] ignored.");
    assert_eq!(result["errors"][1], "Duplicate deal [D002] ignored.");
    assert_eq!(result["errors"][3], "Duplicate deal in file [D001] ignored.");

    Ok(())
}

#[test]
fn test_cli_fails_on_malformed_file_without_output() -> Result<()> {
    let output = run_import("malformed.csv", &[])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Invalid CSV format"));

    Ok(())
}

#[test]
fn test_cli_rejects_non_csv_content_type() -> Result<()> {
    let output = run_import("deals.csv", &["--content-type", "text/plain"])?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Only CSV files are allowed"));

    Ok(())
}

#[test]
fn test_cli_words_messages_in_requested_locale() -> Result<()> {
    let output = run_import("deals.csv", &["--locale", "fr"])?;

    assert!(output.status.success());
    assert_eq!(parse_stdout(&output)?["errors"][0], "Opération en double dans le fichier [D001] ignorée.");
    assert!(String::from_utf8(output.stderr)?.contains("Wording messages in locale [fr]"));

    Ok(())
}

#[test]
fn test_cli_falls_back_to_english_for_unknown_locale() -> Result<()> {
    let output = run_import("deals.csv", &["--locale", "xx"])?;

    assert!(output.status.success());
    assert_eq!(parse_stdout(&output)?["errors"][0], "Duplicate deal in file [D001] ignored.");
    assert!(String::from_utf8(output.stderr)?.contains("Wording messages in locale [en]"));

    Ok(())
}
