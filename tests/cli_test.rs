// Tests for the command line surface that need no browser
use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run chatsend with an isolated home directory
fn run_command(home: &Path, args: &[&str]) -> Result<(Value, i32)> {
    let output = Command::new(env!("CARGO_BIN_EXE_chatsend"))
        .args(args)
        .env("HOME", home)
        .env("RUST_LOG", "off")
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let exit_code = output.status.code().unwrap_or(-1);

    let json = match serde_json::from_str(&stdout) {
        Ok(json) => json,
        Err(_) => serde_json::json!({
            "error": exit_code != 0,
            "message": stdout.to_string(),
            "exit_code": exit_code
        }),
    };

    Ok((json, exit_code))
}

#[test]
fn test_profile_create_list_delete() -> Result<()> {
    let home = TempDir::new()?;
    let profile_name = format!("test-profile-{}", uuid::Uuid::new_v4());

    let (created, code) = run_command(home.path(), &["profile", "create", &profile_name])?;
    assert_eq!(code, 0);
    assert_eq!(created["name"].as_str(), Some(profile_name.as_str()));
    assert_eq!(created["browser"].as_str(), Some("chrome"));

    let (list, _) = run_command(home.path(), &["profile", "list"])?;
    let profiles = list.as_array().expect("profile list should be a JSON array");
    assert!(
        profiles
            .iter()
            .any(|p| p["name"].as_str() == Some(profile_name.as_str()))
    );

    let (deleted, code) = run_command(home.path(), &["profile", "delete", &profile_name])?;
    assert_eq!(code, 0);
    assert_eq!(deleted["deleted"].as_bool(), Some(true));

    let (list, _) = run_command(home.path(), &["profile", "list"])?;
    assert_eq!(list.as_array().map(Vec::len), Some(0));

    Ok(())
}

#[test]
fn test_profile_delete_nonexistent() -> Result<()> {
    let home = TempDir::new()?;

    let (result, code) = run_command(home.path(), &["profile", "delete", "nonexistent-99999"])?;

    assert_eq!(code, 1);
    assert_eq!(result["error"].as_bool(), Some(true));
    assert!(result["message"].as_str().unwrap().contains("does not exist"));
    Ok(())
}

#[test]
fn test_send_rejects_invalid_url_before_launching() -> Result<()> {
    let home = TempDir::new()?;

    let (result, code) = run_command(
        home.path(),
        &["send", "Alice", "hi", "--url", "not-a-url"],
    )?;

    assert_eq!(code, 1);
    assert_eq!(result["error"].as_bool(), Some(true));
    assert!(result["message"].as_str().unwrap().contains("Invalid target URL"));
    Ok(())
}

#[test]
fn test_send_requires_a_message() -> Result<()> {
    let home = TempDir::new()?;

    let (result, code) = run_command(home.path(), &["send", "Alice"])?;

    assert_eq!(code, 1);
    assert!(result["message"].as_str().unwrap().contains("No message given"));
    Ok(())
}

#[test]
fn test_login_requires_a_profile() -> Result<()> {
    let home = TempDir::new()?;

    let (result, code) = run_command(home.path(), &["login"])?;

    assert_eq!(code, 1);
    assert!(result["message"].as_str().unwrap().contains("--profile"));
    Ok(())
}
