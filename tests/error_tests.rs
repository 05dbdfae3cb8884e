//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn voxrelay_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voxrelay"))
}

fn isolated(dir: &TempDir) -> Command {
    let mut cmd = voxrelay_bin();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("VOXRELAY_USERNAME")
        .env_remove("VOXRELAY_PASSWORD")
        .env_remove("VOXRELAY_API_URL");
    cmd
}

fn write_config(dir: &TempDir, contents: &str) {
    let config_dir = dir.path().join("voxrelay");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), contents).unwrap();
}

#[test]
fn missing_credentials_error() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["--server", "1"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("credentials")
                .and(predicate::str::contains("VOXRELAY_USERNAME")),
        );
}

#[test]
fn servers_without_credentials_error() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("servers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn invalid_server_id_is_usage_error() {
    voxrelay_bin()
        .args(["--server", "main-town"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("server"));
}

#[test]
fn invalid_confidence_flag_is_usage_error() {
    voxrelay_bin().args(["--confidence", "2"]).assert().code(2);
}

#[test]
fn config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown").or(predicate::str::contains("Valid")));
}

#[test]
fn config_set_unknown_key() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_confidence() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "set", "recognizer.override_confidence", "1.5"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("1.5").and(predicate::str::contains("between 0 and 1")),
        );

    assert!(!dir.path().join("voxrelay").join("config.toml").exists());
}

#[test]
fn config_set_invalid_bool() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "set", "raw_payload", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true"));
}

#[test]
fn malformed_config_file_error() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "raw_payload = \"sometimes\"");

    isolated(&dir)
        .args(["--server", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn out_of_range_confidence_in_file_is_usage_error() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "username = \"operator\"\npassword = \"secret\"\n\n\
         [recognizer]\noverride_confidence = -0.1\n",
    );

    isolated(&dir)
        .args(["--server", "1"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("recognizer.override_confidence")
                .and(predicate::str::contains("-0.1")),
        );
}

#[test]
fn config_list_with_no_file() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("username").and(predicate::str::contains("(not set)")));
}
