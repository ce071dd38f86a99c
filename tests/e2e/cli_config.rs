//! E2E tests for `kvlog config show`.

use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture(relative: &str) -> String {
    workspace_root()
        .join("crates/testkit/fixtures")
        .join(relative)
        .to_string_lossy()
        .into_owned()
}

fn kvlog(args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_kvlog"));
    for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with("KVLOG_")) {
        command.env_remove(key);
    }
    for (key, value) in env {
        command.env(key, value);
    }
    command.args(args).output()
}

fn show_json(args: &[&str], env: &[(&str, &str)]) -> io::Result<Value> {
    let output = kvlog(args, env)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("config show failed: {stderr}")));
    }
    serde_json::from_slice(&output.stdout).map_err(io::Error::other)
}

#[test]
fn defaults_are_shown() -> io::Result<()> {
    let config = show_json(&["config", "show"], &[])?;
    assert_eq!(config["verbosity"], 0);
    assert_eq!(config["format"], "text");
    assert_eq!(config["output"], "stderr");
    assert_eq!(config["maxLevel"], "info");
    assert!(config.get("name").is_none());
    Ok(())
}

#[test]
fn precedence_is_flags_then_env_then_file() -> io::Result<()> {
    let path = fixture("config/logging.valid.toml");
    let env = [("KVLOG_VERBOSITY", "7"), ("KVLOG_NAME", "env-service")];

    let config = show_json(&["--config", &path, "config", "show"], &env)?;
    assert_eq!(config["verbosity"], 7);
    assert_eq!(config["name"], "env-service");
    assert_eq!(config["maxLevel"], "debug");

    let config = show_json(
        &["--config", &path, "--verbosity", "1", "config", "show"],
        &env,
    )?;
    assert_eq!(config["verbosity"], 1);
    Ok(())
}

#[test]
fn toml_output_is_available() -> io::Result<()> {
    let output = kvlog(&["config", "show", "--toml"], &[])?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("maxLevel = \"info\""), "{stdout}");
    Ok(())
}

#[test]
fn unsupported_config_extension_fails() -> io::Result<()> {
    let output = kvlog(&["--config", "logging.yaml", "config", "show"], &[])?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:unsupported_format"), "{stderr}");
    Ok(())
}
