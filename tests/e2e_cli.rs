//! CLI end-to-end tests
//!
//! Tests for the scenename command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the scenename binary
#[allow(deprecated)]
fn scenename_cmd() -> Command {
    Command::cargo_bin("scenename").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = scenename_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = scenename_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenename"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = scenename_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("scenename "));
}

#[test]
fn test_cli_parse_release() {
    let mut cmd = scenename_cmd();
    cmd.args(["parse", "Psych.S08E01.HDTV.x264-EXCELLENCE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kind: release"))
        .stdout(predicate::str::contains(
            "Canonical: Psych.S08E01.HDTV.x264-EXCELLENCE",
        ));
}

#[test]
fn test_cli_parse_json_output() {
    let mut cmd = scenename_cmd();
    let output = cmd
        .args([
            "parse",
            "--json",
            "Psych.S08E01.HDTV.x264-EXCELLENCE.German-SubCentral",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "subtitle_release");
    assert_eq!(json["value"]["language"], "German");
}

#[test]
fn test_cli_parse_blank_fails() {
    let mut cmd = scenename_cmd();
    cmd.args(["parse", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no parser matched"));
}

#[test]
fn test_cli_rename_multiple() {
    let mut cmd = scenename_cmd();
    cmd.args([
        "rename",
        "psych s08e01",
        "Psych_S08E01_HDTV_x264-EXCELLENCE",
        "Psych S08E01+E02",
    ])
    .assert()
    .success()
    .stdout(predicate::str::diff(
        "psych S08E01\nPsych.S08E01.HDTV.x264-EXCELLENCE\nPsych S08E01+E02\n",
    ));
}

#[test]
fn test_cli_rename_reports_failures() {
    let mut cmd = scenename_cmd();
    cmd.args(["rename", "Psych S08E01", " "])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Psych S08E01"))
        .stderr(predicate::str::contains("1 of 2 names could not be renamed"));
}

#[test]
fn test_cli_rename_with_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("scenename.toml");
    fs::write(
        &config_file,
        r#"
[naming]
range_separator = "~"
number_width = 3
"#,
    )
    .unwrap();

    let mut cmd = scenename_cmd();
    cmd.args([
        "rename",
        "--config",
        config_file.to_str().unwrap(),
        "Psych S08E01-E03",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Psych S008E001~E003"));
}

#[test]
fn test_cli_config_validation() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("scenename.toml");
    fs::write(
        &config_file,
        r#"
[parsing]
extra_tags = ["NORDiC"]

[parsing.extra_languages]
sv = "Swedish"
"#,
    )
    .unwrap();

    let mut cmd = scenename_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Extra tags: 1"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("scenename.toml");
    fs::write(&config_file, "[naming]\naddition_separator = \"\"\n").unwrap();

    let mut cmd = scenename_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("addition_separator"));
}

#[test]
fn test_cli_validate_defaults() {
    let temp = tempdir().unwrap();
    let mut cmd = scenename_cmd();
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"));
}
