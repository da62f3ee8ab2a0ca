//! Integration tests for the maltmill binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// SHA-256 of `hello world`.
const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

const FORMULA: &str = r#"class Tool < Formula
  version '1.2.0'
  homepage 'https://github.com/acme/tool'
  url "https://github.com/acme/tool/releases/download/v1.2.0/tool_v1.2.0_darwin_amd64.zip"
  sha256 'aaaa'

  def install
    bin.install 'tool'
  end
end
"#;

fn maltmill() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("maltmill").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("MALTMILL_GITHUB_API")
        .env_remove("RUST_LOG");
    cmd
}

async fn mock_release(server: &MockServer, repo: &str, tag: &str, files: &[&str]) {
    let assets: Vec<_> = files
        .iter()
        .map(|file| {
            json!({
                "name": file,
                "browser_download_url": format!("{}/download/{tag}/{file}", server.uri()),
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/{repo}/releases/latest")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "tag_name": tag, "assets": assets })),
        )
        .mount(server)
        .await;
    for file in files {
        Mock::given(method("GET"))
            .and(path(format!("/download/{tag}/{file}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello world".to_vec()))
            .mount(server)
            .await;
    }
}

#[test]
fn test_help() {
    maltmill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Homebrew"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_version() {
    maltmill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_files_exits_with_config_error() {
    maltmill()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No formula files given"));
}

#[test]
fn test_invalid_slug_exits_with_config_error() {
    maltmill()
        .args(["new", "acme"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid slug"));
}

#[test]
fn test_missing_file_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    maltmill()
        .current_dir(temp_dir.path())
        .arg("missing.rb")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.rb"));
}

#[test]
fn test_json_error_envelope() {
    maltmill()
        .args(["--json", "new", "acme"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""status":"error""#))
        .stdout(predicate::str::contains(r#""code":"config""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_writes_formula() {
    let server = MockServer::start().await;
    mock_release(
        &server,
        "tool",
        "v1.3.0",
        &["tool_v1.3.0_linux_amd64.zip", "tool_v1.3.0_darwin_amd64.zip"],
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("tool.rb");
    fs::write(&file, FORMULA).unwrap();

    maltmill()
        .env("MALTMILL_GITHUB_API", server.uri())
        .arg("-w")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&file).unwrap();
    assert!(written.contains("version '1.3.0'"));
    assert!(written.contains(&format!("sha256 '{HELLO_SHA256}'")));
    assert!(written.contains("tool_v1.3.0_darwin_amd64.zip"));
    assert!(written.contains("bin.install 'tool'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_prints_formula_without_write() {
    let server = MockServer::start().await;
    mock_release(&server, "tool", "v1.3.0", &["tool_v1.3.0_darwin_amd64.zip"]).await;

    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("tool.rb");
    fs::write(&file, FORMULA).unwrap();

    maltmill()
        .env("MALTMILL_GITHUB_API", server.uri())
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("version '1.3.0'"))
        .stdout(predicate::str::contains(HELLO_SHA256));

    assert_eq!(fs::read_to_string(&file).unwrap(), FORMULA);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_new_writes_named_formula() {
    let server = MockServer::start().await;
    mock_release(
        &server,
        "my-tool",
        "v0.4.1",
        &["my-tool_0.4.1_darwin_amd64.tar.gz"],
    )
    .await;

    let temp_dir = TempDir::new().unwrap();

    maltmill()
        .current_dir(temp_dir.path())
        .env("MALTMILL_GITHUB_API", server.uri())
        .args(["new", "-w", "acme/my-tool"])
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("my-tool.rb")).unwrap();
    assert!(written.starts_with("class MyTool < Formula"));
    assert!(written.contains("version '0.4.1'"));
    assert!(written.contains(&format!("sha256 '{HELLO_SHA256}'")));
}
