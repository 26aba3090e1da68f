//! Error scenario integration tests

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens here, so every request is refused
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn audio_tips_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_audio-tips"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("AUDIO_TIPS_ACCESS_TOKEN")
        .env_remove("AUDIO_TIPS_CREDENTIALS")
        .env_remove("GOOGLE_APPLICATION_CREDENTIALS")
        .env_remove("AUDIO_TIPS_PROJECT")
        .env_remove("AUDIO_TIPS_TRANSLATE_URL")
        .env_remove("AUDIO_TIPS_STORAGE_URL")
        .env_remove("AUDIO_TIPS_FIRESTORE_URL")
        .env("NO_COLOR", "1");
    cmd
}

/// `publish` over an output directory that already holds every sample clip
fn publish_existing_clips(home: &TempDir, out: &TempDir, storage_url: &str, firestore_url: &str) -> Command {
    std::fs::write(out.path().join("hydration.mp3"), b"hydration").unwrap();
    std::fs::write(out.path().join("sleep.mp3"), b"sleep").unwrap();

    let mut cmd = audio_tips_bin(home);
    cmd.env("AUDIO_TIPS_ACCESS_TOKEN", "test-token")
        .env("AUDIO_TIPS_PROJECT", "demo")
        .env("AUDIO_TIPS_TRANSLATE_URL", UNREACHABLE)
        .env("AUDIO_TIPS_STORAGE_URL", storage_url)
        .env("AUDIO_TIPS_FIRESTORE_URL", firestore_url)
        .args(["publish", "--bucket", "tips-bucket", "--output-dir"])
        .arg(out.path());
    cmd
}

#[test]
fn publish_without_credentials_fails_before_any_work() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let missing = home.path().join("missing-key.json");

    audio_tips_bin(&home)
        .args(["publish", "--credentials"])
        .arg(&missing)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Credentials file not found"))
        .stderr(predicate::str::contains("missing-key.json"));

    // Nothing was synthesized
    assert!(!out.path().join("hydration.mp3").exists());
}

#[test]
fn records_without_credentials_fails() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["records", "--credentials", "/nonexistent/serviceAccountKey.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Credentials file not found"));
}

#[test]
fn access_token_requires_project() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .env("AUDIO_TIPS_ACCESS_TOKEN", "ya29.token")
        .arg("records")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing project id"));
}

#[test]
fn invalid_catalog_is_rejected() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["generate", "--catalog", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn overwrite_conflicts_with_skip_existing() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["generate", "--overwrite", "--skip-existing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_bool() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["config", "set", "skip_existing", "sometimes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'true' or 'false'"));
}

#[test]
fn config_set_invalid_tld() {
    let home = TempDir::new().unwrap();

    audio_tips_bin(&home)
        .args(["config", "set", "tld", "com/evil"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid domain"));
}

#[test]
fn failed_upload_is_reported_on_stdout_and_exits_zero() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    publish_existing_clips(&home, &out, UNREACHABLE, UNREACHABLE)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Failed to upload hydration.mp3"))
        .stdout(predicate::str::contains("Failed to upload sleep.mp3"))
        .stderr(predicate::str::contains("0 published, 2 failed"));
}

#[test]
fn strict_publish_exits_one_on_failed_upload() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    publish_existing_clips(&home, &out, UNREACHABLE, UNREACHABLE)
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to upload hydration.mp3"));
}

#[tokio::test]
async fn published_clips_are_reported_on_stdout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/tips-bucket/o"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/b/tips-bucket/o/.+/acl$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/demo/databases/(default)/documents/audioHealthTips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/documents/audioHealthTips/doc-1",
            "fields": {}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let mut cmd = publish_existing_clips(&home, &out, &server.uri(), &server.uri());
    cmd.arg("--strict");

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();

    output
        .assert()
        .code(0)
        .stdout(predicate::str::contains(format!(
            "Uploaded hydration.mp3 to {}/tips-bucket/audioTips/hydration.mp3",
            server.uri()
        )))
        .stdout(predicate::str::contains("Uploaded sleep.mp3 to"))
        .stderr(predicate::str::contains("2 published, 0 failed"));
}
