//! Integration tests for the `vidsplit show` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vidsplit(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vidsplit-cli").unwrap();
    cmd.current_dir(temp_dir.path()).env("HOME", temp_dir.path());
    cmd
}

fn write_manifests(temp_dir: &TempDir) {
    fs::write(temp_dir.path().join("train.csv"), "door_closed/1.mp4 0\ndoor_closed/2.mp4 0\ndoor_opened/a.mp4 1\n")
        .unwrap();
    fs::write(temp_dir.path().join("val.csv"), "door_closed/3.mp4 0\n").unwrap();
    fs::write(temp_dir.path().join("test.csv"), "door_closed/4.mp4 0\ndoor_opened/b.mp4 1\n").unwrap();
}

#[test]
fn test_show_human_output() {
    let temp_dir = TempDir::new().unwrap();
    write_manifests(&temp_dir);

    vidsplit(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries: 6").and(predicate::str::contains("Classes: 2")));
}

#[test]
fn test_show_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write_manifests(&temp_dir);

    let output = vidsplit(&temp_dir).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_entries"], 6);
    assert_eq!(summary["num_classes"], 2);
    assert_eq!(summary["splits"][0]["split"], "train");
    assert_eq!(summary["splits"][0]["lines"], 3);
}

#[test]
fn test_show_missing_manifests() {
    let temp_dir = TempDir::new().unwrap();

    vidsplit(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_show_malformed_manifest() {
    let temp_dir = TempDir::new().unwrap();
    write_manifests(&temp_dir);
    fs::write(temp_dir.path().join("val.csv"), "door_closed/3.mp4\n").unwrap();

    vidsplit(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("val.csv:1"));
}

#[test]
fn test_show_after_generate() {
    let temp_dir = TempDir::new().unwrap();
    for (label, files) in [("walk", ["1.mp4", "2.mp4", "3.mp4"]), ("run", ["4.mp4", "5.mp4", "6.mp4"])] {
        let dir = temp_dir.path().join(label);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"video").unwrap();
        }
    }

    vidsplit(&temp_dir)
        .args(["generate", "--label", "walk=0", "--label", "run=1", "--out", "out", "--json"])
        .assert()
        .success();

    let output = vidsplit(&temp_dir).args(["show", "--dir", "out", "--json"]).output().unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_entries"], 6);
    assert!(summary.get("overlaps").is_none());
}
