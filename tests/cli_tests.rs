//! CLI Integration Tests for llm-bridge
//!
//! Runs the built binary against temporary config files and a wiremock
//! stand-in for the Ollama server.

use serde_json::json;
use std::fs;
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run llm-bridge with arguments inside `dir`
async fn run_bridge(args: &[&str], dir: &TempDir) -> Output {
    Command::new(env!("CARGO_BIN_EXE_llm-bridge"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("OLLAMA_MODEL")
        .env_remove("OLLAMA_BASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute llm-bridge")
}

fn write_config(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("llm-bridge.toml"), content).unwrap();
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[tokio::test]
async fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_bridge(&["--help"], &dir).await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("config"));
}

#[tokio::test]
async fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run_bridge(&["--version"], &dir).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("llm-bridge"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[tokio::test]
async fn test_config_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let output = run_bridge(&["--no-color", "config", "--validate"], &dir).await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[OK] Configuration is valid"));
    assert!(stderr.contains("llama3:latest (ollama)"));
}

#[tokio::test]
async fn test_config_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        r#"
default_provider = "missing"

[providers.local]
type = "ollama"
"#,
    );

    let output = run_bridge(&["--no-color", "config"], &dir).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

// =============================================================================
// Chat Command Tests
// =============================================================================

#[tokio::test]
async fn test_chat_prints_completion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3:latest",
            "prompt": "Be brief.\nSay hello",
            "options": {"temperature": 0.7, "seed": 7},
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hello"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = mock_server.uri();
    let output = run_bridge(
        &[
            "chat",
            "--base-url",
            uri.as_str(),
            "--system",
            "Be brief.",
            "-o",
            "seed=7",
            "Say",
            "hello",
        ],
        &dir,
    )
    .await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn test_chat_uses_named_provider_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "phi3:mini", "options": {"temperature": 0.0}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "tiny"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        &format!(
            r#"
default_provider = "local"

[providers.local]
type = "ollama"

[providers.small]
type = "ollama"
model = "phi3:mini"
temperature = 0.0
base_url = "{}"
"#,
            mock_server.uri()
        ),
    );

    let output = run_bridge(&["chat", "--provider", "small", "hi"], &dir).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "tiny");
}

#[tokio::test]
async fn test_chat_json_repairs_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Sure:\n```json\n{\"colors\": [\"red\", \"blue\",]}\n```"
        })))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = mock_server.uri();
    let output = run_bridge(&["chat", "--base-url", uri.as_str(), "--json", "colors"], &dir).await;

    assert!(output.status.success());
    let printed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(printed, json!({"colors": ["red", "blue"]}));
}

#[tokio::test]
async fn test_chat_server_error_exits_non_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = mock_server.uri();
    let output = run_bridge(&["chat", "--base-url", uri.as_str(), "hi"], &dir).await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ollama API error: 500"));
}
