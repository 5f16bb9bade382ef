//! Tests for the `neocities` binary that never reach the network.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// The `neocities` binary, run from an empty directory (so no `.env` is
/// picked up) and with every `NEOCITIES_*` variable cleared.
fn neocities_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("neocities");
    cmd.current_dir(dir.path())
        .env_remove("NEOCITIES_KEY")
        .env_remove("NEOCITIES_KEYFILE")
        .env_remove("NEOCITIES_API_URL")
        .env_remove("NEOCITIES_NOCONFIRM")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("upload")
            .and(predicate::str::contains("push"))
            .and(predicate::str::contains("delete"))
            .and(predicate::str::contains("info"))
            .and(predicate::str::contains("list")),
    );
}

#[test]
fn test_upload_without_key_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
    neocities_cmd(&dir)
        .args(["upload", "index.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("an API key is required"));
}

#[test]
fn test_key_and_keyfile_conflict() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["--key", "abc", "--keyfile", "key.txt", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unreadable_keyfile_fails() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["--keyfile", "missing.key", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keyfile read returned error"));
}

#[test]
fn test_upload_missing_file_fails_before_sending() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["--key", "abc", "--api-url", "http://127.0.0.1:9"])
        .args(["upload", "missing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read file at 'missing.html'"));
}

#[test]
fn test_push_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["--key", "abc", "--api-url", "http://127.0.0.1:9"])
        .args(["push", "public", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to walk directory 'public'"));
}

#[test]
fn test_push_reports_each_failed_file_once() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("site")).unwrap();
    std::fs::write(dir.path().join("site/index.html"), "<h1>hi</h1>").unwrap();
    neocities_cmd(&dir)
        .args(["--key", "abc", "--api-url", "http://127.0.0.1:9"])
        .args(["push", "site", "--yes"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("1 of 1 file(s) failed to upload").and(predicate::function(
                |stderr: &str| stderr.matches("site/index.html").count() == 1,
            )),
        );
}

#[test]
fn test_delete_requires_files() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["--key", "abc", "delete"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_info_requires_site_name() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir).arg("info").assert().failure().code(2);
}

#[test]
fn test_completions_for_bash() {
    let dir = TempDir::new().unwrap();
    neocities_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("neocities"));
}
