//! End-to-end runs of the `oasprobe` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use oasprobe_test_utils::{pom_with_generator, SourceTree, USERS_V2_JSON};

/// Runs the binary isolated from the caller's config and environment.
fn oasprobe(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_oasprobe"))
        .current_dir(cwd)
        .env("HOME", cwd)
        .env_remove("OASPROBE_CHECK_SPECS")
        .env_remove("OASPROBE_FETCH_TIMEOUT_SECS")
        .env_remove("OASPROBE_PLUGINS")
        .env_remove("OASPROBE_UNKNOWN_SCHEME")
        .args(args)
        .output()
        .context("failed to execute oasprobe")
}

#[test]
fn scan_prints_specs_as_json() -> Result<()> {
    let tree = SourceTree::with_sample_project()?;
    let out = oasprobe(tree.root(), &["scan", "--root", "."])?;
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let specs: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    let specs = specs.as_array().context("spec array")?;
    assert_eq!(specs.len(), 3);
    for spec in specs {
        assert!(Path::new(spec["location"].as_str().unwrap()).is_absolute());
        assert!(spec["content"].is_string());
        assert!(spec.get("requiresResolution").is_some());
    }
    Ok(())
}

#[test]
fn config_file_enables_failing_checks() -> Result<()> {
    let tree = SourceTree::with_sample_project()?;
    tree.write("oasprobe.toml", "[scan]\ncheck = \"fail\"\n")?;

    let out = oasprobe(tree.root(), &["scan", "--format", "text"])?;
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("3 spec(s)"), "stdout: {stdout}");

    let overridden = oasprobe(tree.root(), &["scan", "--check", "none", "--format", "text"])?;
    assert!(overridden.status.success());
    Ok(())
}

#[test]
fn pom_declared_specs_are_merged() -> Result<()> {
    let tree = SourceTree::new()?;
    tree.write("project/pom.xml", &pom_with_generator(&["../elsewhere/users.json"]))?;
    tree.write("elsewhere/users.json", USERS_V2_JSON)?;
    let project = tree.root().join("project");

    let out = oasprobe(
        &project,
        &["scan", "--pom", "pom.xml", "--diagnose"],
    )?;
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(report["specs"][0]["location"], "../elsewhere/users.json");
    assert_eq!(report["specs"][0]["type"], "swagger");
    assert_eq!(report["skipped"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn inspect_then_decode_round_trips() -> Result<()> {
    let tree = SourceTree::new()?;
    let path = tree.write("users.json", USERS_V2_JSON)?;

    let out = oasprobe(tree.root(), &["inspect", path.to_str().unwrap()])?;
    assert!(out.status.success());
    let spec: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    let content = spec["content"].as_str().context("content")?.to_string();

    let mut child = Command::new(env!("CARGO_BIN_EXE_oasprobe"))
        .current_dir(tree.root())
        .env("HOME", tree.root())
        .args(["decode", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .context("stdin")?
        .write_all(content.as_bytes())?;
    let decoded = child.wait_with_output()?;
    assert!(decoded.status.success());
    let yaml = String::from_utf8(decoded.stdout)?;
    assert!(yaml.starts_with("swagger: '2.0'") || yaml.starts_with("swagger: \"2.0\""));
    Ok(())
}
