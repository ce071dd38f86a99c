//! E2E tests for `kvlog emit`.

use serde_json::Value;
use std::io;
use std::process::{Command, Output};

const KVLOG_VARS: [&str; 7] = [
    "KVLOG_VERBOSITY",
    "KVLOG_NAME",
    "KVLOG_FORMAT",
    "KVLOG_OUTPUT",
    "KVLOG_MAX_LEVEL",
    "KVLOG_ANSI",
    "KVLOG_TIMESTAMPS",
];

fn kvlog(args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_kvlog"));
    for var in KVLOG_VARS {
        command.env_remove(var);
    }
    command
        .env("KVLOG_OUTPUT", "stdout")
        .env("KVLOG_TIMESTAMPS", "false")
        .env("KVLOG_ANSI", "false");
    for (key, value) in env {
        command.env(key, value);
    }
    command.args(args).output()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn emit_writes_text_line() -> io::Result<()> {
    let output = kvlog(
        &["--name", "e2e", "emit", "--message", "hello", "--kv", "count=3"],
        &[],
    )?;
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("INFO"), "{text}");
    assert!(text.contains("hello"), "{text}");
    assert!(text.contains("count=3 logger=e2e"), "{text}");
    Ok(())
}

#[test]
fn emit_above_verbosity_is_silent() -> io::Result<()> {
    let output = kvlog(&["--verbosity", "1", "emit", "--message", "quiet", "--v", "2"], &[])?;
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let output = kvlog(&["--verbosity", "2", "emit", "--message", "loud", "--v", "2"], &[])?;
    assert!(stdout(&output).contains("loud"));
    Ok(())
}

#[test]
fn emit_error_as_json() -> io::Result<()> {
    let output = kvlog(
        &["--format", "json", "emit", "--message", "failed", "--error", "disk full"],
        &[],
    )?;
    assert!(output.status.success());

    let line: Value = serde_json::from_str(stdout(&output).trim()).map_err(io::Error::other)?;
    assert_eq!(line["level"], "ERROR");
    assert_eq!(line["fields"]["message"], "failed");
    assert_eq!(line["fields"]["error"], "disk full");
    Ok(())
}

#[test]
fn json_output_keeps_kv_value_types() -> io::Result<()> {
    let output = kvlog(
        &["--format", "json", "emit", "--message", "typed", "--kv", "n=3", "--kv", "who=ada"],
        &[],
    )?;
    assert!(output.status.success());

    let line: Value = serde_json::from_str(stdout(&output).trim()).map_err(io::Error::other)?;
    let kv = line["fields"]["kv"].as_str().unwrap_or_default();
    let kv: Value = serde_json::from_str(kv).map_err(io::Error::other)?;
    assert_eq!(kv["n"], 3);
    assert_eq!(kv["who"], "ada");
    Ok(())
}

#[test]
fn env_verbosity_applies_and_flags_override_it() -> io::Result<()> {
    let env = [("KVLOG_VERBOSITY", "5")];
    let output = kvlog(&["emit", "--message", "from env", "--v", "5"], &env)?;
    assert!(stdout(&output).contains("from env"));

    let output = kvlog(&["--verbosity", "0", "emit", "--message", "flag wins", "--v", "5"], &env)?;
    assert!(stdout(&output).is_empty());
    Ok(())
}

#[test]
fn backend_max_level_filters_info() -> io::Result<()> {
    let env = [("KVLOG_MAX_LEVEL", "warn")];
    let output = kvlog(&["emit", "--message", "filtered"], &env)?;
    assert!(stdout(&output).is_empty());

    let output = kvlog(&["emit", "--message", "kept", "--error", "boom"], &env)?;
    assert!(stdout(&output).contains("kept"));
    Ok(())
}

#[test]
fn malformed_kv_exits_with_invalid_input() -> io::Result<()> {
    let output = kvlog(&["emit", "--message", "bad", "--kv", "novalue"], &[])?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: invalid input"), "{stderr}");
    Ok(())
}

#[test]
fn invalid_env_exits_with_invalid_input() -> io::Result<()> {
    let output = kvlog(&["emit", "--message", "x"], &[("KVLOG_VERBOSITY", "lots")])?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:invalid_env_int"), "{stderr}");
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_unicode_env_exits_with_invalid_input() -> io::Result<()> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut command = Command::new(env!("CARGO_BIN_EXE_kvlog"));
    for var in KVLOG_VARS {
        command.env_remove(var);
    }
    let output = command
        .env("KVLOG_NAME", OsString::from_vec(vec![b'a', 0xff]))
        .args(["emit", "--message", "x"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:invalid_env_unicode"), "{stderr}");
    Ok(())
}
