// ABOUTME: Integration tests for the kiln CLI commands.
// ABOUTME: Validates --help output and init command behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn kiln_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kiln"))
}

#[test]
fn help_shows_commands() {
    kiln_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("reimage"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kiln.yml");

    kiln_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "kiln.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("endpoint:"), "Config should have a FOG endpoint");
    assert!(content.contains("ipmi:"), "Config should have an ipmi section");
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kiln.yml");

    fs::write(&config_path, "existing: config").unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kiln.yml");

    fs::write(&config_path, "existing: config").unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("fog:"));
}

#[test]
fn reimage_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args([
            "reimage",
            "cephtest-042",
            "--os-type",
            "ubuntu",
            "--os-version",
            "20.04",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn reimage_requires_os_arguments() {
    kiln_cmd()
        .args(["reimage", "cephtest-042"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--os-type"));
}
