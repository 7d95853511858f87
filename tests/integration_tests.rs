//! Integration tests for the StayScope CLI

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

const STREETS_CSV: &str = "\
name,lat,lng
Namdaemun,37.5600,126.9753
Tower,37.5512,126.9882
No coordinates,,
";

fn stayscope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stayscope"))
        .args(args)
        .env_remove("STAYSCOPE_HOTELS__SERVICE_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute stayscope")
}

/// A config with no service key and one UTF-8 attraction dataset
fn write_config(dir: &TempDir) -> NamedTempFile {
    let csv_path = dir.path().join("streets.csv");
    std::fs::write(&csv_path, STREETS_CSV).unwrap();

    let mut config = NamedTempFile::new().unwrap();
    write!(
        config,
        r#"
[cache]
ttl_seconds = 60

[[poi_sources]]
label = "Test streets"
path = "{}"
encoding = "utf-8"

[poi_sources.fields]
name = "name"
latitude = "lat"
longitude = "lng"
"#,
        csv_path.display()
    )
    .unwrap();
    config
}

#[test]
fn test_cli_help() {
    let output = stayscope(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stayscope"));
    assert!(stdout.contains("nearby"));
    assert!(stdout.contains("serve"));
}

#[test]
fn test_sources_reports_each_feed() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let config_path = config.path().to_str().unwrap();

    let output = stayscope(&["--config", config_path, "sources"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tour-api/searchStay2: failed"));
    assert!(stdout.contains("Test streets: 2 loaded, 1 dropped"));
    assert!(stdout.contains("cache ttl: 60 s"));
}

#[test]
fn test_nearby_rejects_radius_outside_range() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let config_path = config.path().to_str().unwrap();

    let output = stayscope(&[
        "--config",
        config_path,
        "nearby",
        "--hotel",
        "Seoul Station Hotel",
        "--radius",
        "100",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("radius must be between 500 and 2000 m"));
}

#[test]
fn test_nearby_without_hotels_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let config_path = config.path().to_str().unwrap();

    let output = stayscope(&["--config", config_path, "nearby", "--hotel", "Any"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not load hotel list"));
}
