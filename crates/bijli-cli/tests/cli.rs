use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join(relative)
}

fn fixture(name: &str) -> String {
    repo_path(&format!("test_data/outages/{name}"))
        .to_str()
        .unwrap()
        .to_string()
}

/// The binary with an isolated home so no user configuration leaks in.
fn bijli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bijli").unwrap();
    cmd.env("BIJLI_HOME", home.path());
    cmd
}

#[test]
fn analyze_prints_clustered_duplicates() {
    let home = tempdir().unwrap();
    bijli(&home)
        .args(["analyze", &fixture("june_2024.csv")])
        .assert()
        .success()
        .stdout(predicate::str::contains("group_id"))
        .stdout(predicate::str::contains("2 duplicate groups, 5 rows flagged"))
        .stdout(predicate::str::contains("66KV").not())
        .stdout(predicate::str::contains("220KV").not());
}

#[test]
fn analyze_csv_output_is_ranked_by_count() {
    let home = tempdir().unwrap();
    let output = bijli(&home)
        .args(["analyze", &fixture("june_2024.csv"), "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "group_id,Feeding Grid,Zone,Circle,Division,Feeder,Outage Reason,Category,Start Time,Diff in mins,count"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1,GridZ,"));
    assert!(lines[1].ends_with(",12.5,3"));
    assert!(lines[4].starts_with("2,GridX,"));
    assert!(lines[5].ends_with(",30,2"));
}

#[test]
fn scenario_a_grid_reason_duration() {
    let home = tempdir().unwrap();
    let output = bijli(&home)
        .args([
            "analyze",
            &fixture("june_2024.csv"),
            "--preset",
            "grid-reason-duration",
            "--format",
            "csv",
        ])
        .output()
        .unwrap();
    let text = String::from_utf8(output.stdout).unwrap();
    let grid_x: Vec<&str> = text.lines().filter(|l| l.starts_with("GridX")).collect();
    assert_eq!(
        grid_x,
        vec![
            "GridX,11kV line/DT Maintenance Work,30,2",
            "GridX,11kV line/DT Maintenance Work,30,2"
        ]
    );
    assert!(!text.contains(",45,"));
}

#[test]
fn no_duplicates_is_a_successful_empty_result() {
    let home = tempdir().unwrap();
    bijli(&home)
        .args(["analyze", &fixture("no_duplicates.csv")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate outages"));
}

#[test]
fn missing_column_reports_missing_and_present() {
    let home = tempdir().unwrap();
    bijli(&home)
        .args(["analyze", &fixture("missing_feeder.csv")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns: Feeder"))
        .stderr(predicate::str::contains("columns found in file: Zone, Circle"));
}

#[test]
fn one_bad_file_does_not_stop_the_rest() {
    let home = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    bijli(&home)
        .args([
            "analyze",
            &fixture("bad_duration.csv"),
            &fixture("june_2024.csv"),
            "-o",
            out_dir.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("half an hour"))
        .stderr(predicate::str::contains("1 of 2 input file(s) failed"));
    assert!(out_dir.path().join("june_2024-duplicates.csv").exists());
    assert!(!out_dir.path().join("bad_duration-duplicates.csv").exists());
}

#[test]
fn export_round_trips_through_analyze_input() {
    let home = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("dupes.csv");
    bijli(&home)
        .args([
            "analyze",
            &fixture("june_2024.csv"),
            "--preset",
            "full-key",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();
    let exported = fs::read_to_string(&out).unwrap();
    assert!(exported.starts_with("Feeding Grid,Division,Outage Reason,Category,Feeder,Diff in mins,count"));

    let stdout = bijli(&home)
        .args(["analyze", &fixture("june_2024.csv"), "--preset", "full-key", "--format", "csv"])
        .output()
        .unwrap()
        .stdout;
    assert_eq!(String::from_utf8(stdout).unwrap(), exported);
}

#[test]
fn failed_export_prints_no_rows() {
    let home = tempdir().unwrap();
    let blocker = home.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let target = blocker.join("dupes.csv");
    let output = bijli(&home)
        .args([
            "analyze",
            &fixture("june_2024.csv"),
            "--format",
            "csv",
            "-o",
            target.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exporting to"));
}

#[test]
fn json_output_is_one_object_per_row() {
    let home = tempdir().unwrap();
    let output = bijli(&home)
        .args(["analyze", &fixture("june_2024.csv"), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["group_id"], 1);
    assert_eq!(rows[0]["Feeding Grid"], "GridZ");
    assert_eq!(rows[0]["count"], 3);
    assert_eq!(rows[4]["group_id"], 2);
    assert_eq!(rows[4]["Diff in mins"], "30");
}

#[test]
fn custom_profile_from_config_file() {
    let home = tempdir().unwrap();
    let config = home.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[[profiles]]
name = "division-duration"
group_key = ["Division", "Diff in mins"]
projection = ["Division", "Remarks", "Diff in mins", "count"]
"#,
    )
    .unwrap();
    let output = bijli(&home)
        .args([
            "--config",
            config.to_str().unwrap(),
            "analyze",
            &fixture("june_2024.csv"),
            "--profile",
            "division-duration",
            "--format",
            "csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("Division,Remarks,Diff in mins,count"));
    assert!(text.contains("Division-C,,12.5,3"));
}

#[test]
fn presets_lists_built_in_profiles() {
    let home = tempdir().unwrap();
    bijli(&home)
        .args(["presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grid-duration"))
        .stdout(predicate::str::contains("grid-frequency"))
        .stdout(predicate::str::contains("maintenance-reasons"));
}

#[test]
fn config_init_writes_default_file() {
    let home = tempdir().unwrap();
    bijli(&home).args(["config", "init"]).assert().success();
    let path = home.path().join("config").join("bijli.toml");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("preset = \"grid-duration\""));

    bijli(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn completions_are_generated() {
    let home = tempdir().unwrap();
    bijli(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bijli"));
}
