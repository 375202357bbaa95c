//! End-to-end tests for the postgen CLI

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;

/// Get the workspace root directory
fn workspace_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .context("Failed to find workspace root")
}

fn run_generate(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_postgen"))
        .arg("generate")
        .args(args)
        .output()
        .context("Failed to run postgen")?;
    Ok(output)
}

#[test]
fn test_generate_from_descriptor_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("users.json");
    let source = workspace_root()?.join("tests/fixtures/descriptors/users.yaml");

    let output = run_generate(&[
        "--source",
        source.to_str().context("non-utf8 path")?,
        "--output",
        out.to_str().context("non-utf8 path")?,
    ])?;
    assert!(
        output.status.success(),
        "postgen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(json["info"]["name"], "users");
    assert_eq!(json["info"]["_postman_id"], "");
    assert_eq!(
        json["info"]["schema"],
        "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
    );

    let items = json["item"].as_array().context("item is not an array")?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "/v1/users/");
    assert_eq!(items[0]["request"]["url"]["raw"], "https://api.example.com/v1/users");
    assert_eq!(items[0]["response"], Value::Null);
    assert_eq!(items[0]["protocolProfileBehavior"]["disableBodyPruning"], true);
    Ok(())
}

#[test]
fn test_generate_from_har_with_config() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("recorded.json");
    let config = dir.path().join("postgen.yaml");
    let source = workspace_root()?.join("tests/fixtures/har/sample.har");
    std::fs::write(
        &config,
        format!(
            "collection_name: Recorded\nsource_path: {}\nsource_kind: har\noutput_path: {}\n",
            source.display(),
            out.display()
        ),
    )?;

    let output = run_generate(&["--config", config.to_str().context("non-utf8 path")?])?;
    assert!(
        output.status.success(),
        "postgen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(json["info"]["name"], "Recorded");
    assert_eq!(json["item"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_missing_source_fails() -> Result<()> {
    let output = run_generate(&["--source", "does-not-exist.yaml", "--output", "/dev/null"])?;
    assert!(!output.status.success());
    Ok(())
}
