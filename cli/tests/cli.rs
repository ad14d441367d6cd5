#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

const MODEL: &str = "test-model";

fn copilot_command(home: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("eda-copilot")?;
    cmd.env("EDA_COPILOT_HOME", home)
        .env_remove("RUST_LOG")
        .args(["--color", "never"]);
    Ok(cmd)
}

fn write_mock_config(home: &Path, server: &MockServer) -> Result<()> {
    fs::write(
        home.join("config.toml"),
        format!(
            r#"
model = "{MODEL}"
model_provider = "mock"

[model_providers.mock]
name = "Mock"
base_url = "{}/v1"
experimental_api_key = "test-key"
"#,
            server.uri()
        ),
    )?;
    Ok(())
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn analysis_text() -> String {
    json!({
        "overallVerdict": "NO-GO",
        "overallRiskScore": 82,
        "globalSummary": "Setup violations on clk_core block tape-out.",
        "logs": [
            { "fileName": "drc.out", "tool": "Calibre", "decision": "GO", "riskScore": 5 },
            { "fileName": "sta.log", "tool": "PrimeTime", "decision": "NO-GO", "riskScore": 88,
              "executiveSummary": "WNS -0.142 ns on clk_core." }
        ]
    })
    .to_string()
}

fn write_logs(dir: &Path) -> Result<()> {
    fs::write(dir.join("sta.log"), "WNS -0.142 ns on clk_core")?;
    fs::write(dir.join("drc.out"), "0 violations")?;
    fs::write(dir.join("notes.md"), "not a log")?;
    Ok(())
}

async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(text)))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn analyze_renders_report_and_records_history() -> Result<()> {
    let server = MockServer::start().await;
    mount_reply(&server, &format!("Here you go:\n{}", analysis_text())).await;
    let home = TempDir::new()?;
    write_mock_config(home.path(), &server)?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    copilot_command(home.path())?
        .args(["analyze", "-q", "Ready for tape-out?"])
        .arg(logs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TAPE-OUT BLOCKED"))
        .stdout(predicate::str::contains("WNS -0.142 ns on clk_core."))
        .stderr(predicate::str::contains("Saved to history as"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body)?;
    let input = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    assert!(input.contains("BATCH_MANIFEST: drc.out, sta.log"), "{input}");
    assert!(input.contains("USER_OBJECTIVE: Ready for tape-out?"), "{input}");
    assert!(!input.contains("not a log"));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("history.json"))?)?;
    let entries = stored.as_array().expect("history array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["label"], "Review of 2 files (NO-GO)");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn analyze_json_prints_result() -> Result<()> {
    let server = MockServer::start().await;
    mount_reply(&server, &analysis_text()).await;
    let home = TempDir::new()?;
    write_mock_config(home.path(), &server)?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    let output = copilot_command(home.path())?
        .args(["analyze", "--json"])
        .arg(logs.path().join("sta.log"))
        .output()?;
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["overallVerdict"], "NO-GO");
    assert_eq!(parsed["logs"][1]["decision"], "NO-GO");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unparseable_reply_fails_without_saving() -> Result<()> {
    let server = MockServer::start().await;
    mount_reply(&server, "I could not review these logs.").await;
    let home = TempDir::new()?;
    write_mock_config(home.path(), &server)?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    copilot_command(home.path())?
        .arg("analyze")
        .arg(logs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Analysis engine failed to produce a valid JSON stream.",
        ));
    assert!(!home.path().join("history.json").exists());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreadable_file_fails_before_any_request() -> Result<()> {
    let server = MockServer::start().await;
    mount_reply(&server, &analysis_text()).await;
    let home = TempDir::new()?;
    write_mock_config(home.path(), &server)?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    copilot_command(home.path())?
        .arg("analyze")
        .arg(logs.path().join("sta.log"))
        .arg(logs.path().join("missing.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"))
        .stderr(predicate::str::contains("missing.log"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
    Ok(())
}

#[test]
fn empty_directory_is_a_no_op() -> Result<()> {
    let home = TempDir::new()?;
    let logs = TempDir::new()?;

    copilot_command(home.path())?
        .env_remove("API_KEY")
        .arg("analyze")
        .arg(logs.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No log files found"));
    Ok(())
}

#[test]
fn missing_api_key_is_reported() -> Result<()> {
    let home = TempDir::new()?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    copilot_command(home.path())?
        .env_remove("API_KEY")
        .env_remove("GEMINI_BASE_URL")
        .arg("analyze")
        .arg(logs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing API key: set API_KEY"));
    assert!(!home.path().join("history.json").exists());
    Ok(())
}

#[test]
fn unknown_provider_is_a_config_error() -> Result<()> {
    let home = TempDir::new()?;
    let logs = TempDir::new()?;
    write_logs(logs.path())?;

    copilot_command(home.path())?
        .args(["--provider", "nope", "analyze"])
        .arg(logs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("model provider `nope` not found"));
    Ok(())
}

fn write_history(home: &Path) -> Result<()> {
    let entries = json!([
        {
            "id": "aaaa1111-0000-4000-8000-000000000001",
            "timestamp": 1_772_366_400_000_i64,
            "label": "Review of 2 files (NO-GO)",
            "result": {
                "overallVerdict": "NO-GO",
                "overallRiskScore": 82,
                "logs": [
                    { "fileName": "drc.out", "decision": "GO", "riskScore": 5,
                      "executiveSummary": "DRC clean." },
                    { "fileName": "sta.log", "decision": "NO-GO", "riskScore": 88,
                      "executiveSummary": "Setup failing." }
                ]
            }
        },
        {
            "id": "aaaa2222-0000-4000-8000-000000000002",
            "timestamp": 1_772_280_000_000_i64,
            "label": "Review of 1 files (GO)",
            "result": { "overallVerdict": "GO", "logs": [] }
        }
    ]);
    fs::write(home.join("history.json"), serde_json::to_string(&entries)?)?;
    Ok(())
}

#[test]
fn history_list_shows_entries_newest_first() -> Result<()> {
    let home = TempDir::new()?;
    write_history(home.path())?;

    let output = copilot_command(home.path())?.args(["history", "list"]).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Analysis History (2)");
    assert!(lines[1].starts_with("  aaaa1111  "), "{stdout}");
    assert!(lines[2].starts_with("  aaaa2222  "), "{stdout}");
    Ok(())
}

#[test]
fn history_list_without_file_is_empty() -> Result<()> {
    let home = TempDir::new()?;
    copilot_command(home.path())?
        .args(["history", "list", "--json"])
        .assert()
        .success()
        .stdout("[]\n");
    Ok(())
}

#[test]
fn history_show_opens_the_failing_log_by_default() -> Result<()> {
    let home = TempDir::new()?;
    write_history(home.path())?;

    copilot_command(home.path())?
        .args(["history", "show", "aaaa1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup failing."))
        .stdout(predicate::str::contains("DRC clean.").not());

    copilot_command(home.path())?
        .args(["history", "show", "aaaa1", "--log", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRC clean."));
    Ok(())
}

#[test]
fn history_show_rejects_ambiguous_prefix() -> Result<()> {
    let home = TempDir::new()?;
    write_history(home.path())?;

    copilot_command(home.path())?
        .args(["history", "show", "aaaa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matches more than one stored analysis"));
    Ok(())
}

#[test]
fn history_delete_removes_only_that_entry() -> Result<()> {
    let home = TempDir::new()?;
    write_history(home.path())?;

    copilot_command(home.path())?
        .args(["history", "delete", "aaaa2"])
        .assert()
        .success()
        .stdout("Deleted aaaa2222\n");

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("history.json"))?)?;
    let ids = stored
        .as_array()
        .expect("history array")
        .iter()
        .map(|entry| entry["id"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["aaaa1111-0000-4000-8000-000000000001"]);

    copilot_command(home.path())?
        .args(["history", "delete", "aaaa2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stored analysis matches `aaaa2`"));
    Ok(())
}
