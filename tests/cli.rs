use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

const STROKE_SCRIPT: &str = r#"
[[event]]
at_ms = 0
kind = "move"
x = 100
y = 100

[[event]]
at_ms = 10
kind = "press"
button = "right"

[[event]]
at_ms = 40
kind = "release"
button = "right"

[[event]]
at_ms = 120
kind = "move"
x = 200
y = 100

[[event]]
at_ms = 180
kind = "move"
x = 300
y = 100

[[event]]
at_ms = 400
kind = "press"
button = "right"

[[event]]
at_ms = 420
kind = "release"
button = "right"

[[event]]
at_ms = 480
kind = "move"
x = 500
y = 300
"#;

fn surgimark_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("surgimark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_script(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("script.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn surgimark_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    surgimark_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Click-driven annotation surface with a failsafe",
        ));
}

#[test]
fn no_arguments_prints_gesture_summary() {
    let temp = TempDir::new().unwrap();
    surgimark_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Left double click"));
}

#[test]
fn replay_writes_final_frame() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, STROKE_SCRIPT);
    let output = temp.path().join("frame.png");

    surgimark_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--size", "640x400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frame.png"));

    let mut file = File::open(&output).unwrap();
    let mut frame = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((frame.width(), frame.height()), (640, 400));

    let stride = frame.stride() as usize;
    let data = frame.data().unwrap();
    let at = |x: usize, y: usize| {
        let offset = y * stride + x * 4;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    };
    // Green stroke on white background (BGRA in memory).
    assert_eq!(at(200, 100), [0, 255, 0, 255]);
    assert_eq!(at(200, 300), [255, 255, 255, 255]);
}

#[test]
fn replay_with_custom_config_uses_its_colors() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, STROKE_SCRIPT);
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[drawing]\ncolor = \"blue\"\nbackground_color = \"black\"\n")
        .unwrap();
    let output = temp.path().join("blue.png");

    surgimark_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--size", "640x400"])
        .assert()
        .success();

    let mut file = File::open(&output).unwrap();
    let mut frame = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    let stride = frame.stride() as usize;
    let data = frame.data().unwrap();
    let offset = 100 * stride + 200 * 4;
    assert_eq!(&data[offset..offset + 4], &[255, 0, 0, 255]);
    let background = 300 * stride + 200 * 4;
    assert_eq!(&data[background..background + 4], &[0, 0, 0, 255]);
}

#[test]
fn missing_script_is_reported() {
    let temp = TempDir::new().unwrap();
    surgimark_cmd(temp.path())
        .arg("--replay")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read replay script"));
}

#[test]
fn unpaired_release_engages_failsafe() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        &temp,
        "[[event]]\nat_ms = 5\nkind = \"release\"\nbutton = \"left\"\nx = 10\ny = 10\n",
    );
    let output = temp.path().join("failsafe.png");

    surgimark_cmd(temp.path())
        .arg("--replay")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--size", "320x240"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failsafe engaged during click classification"));

    assert!(output.exists(), "the frozen frame is still written");
}

#[test]
fn malformed_size_is_rejected() {
    let temp = TempDir::new().unwrap();
    surgimark_cmd(temp.path())
        .args(["--size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected WIDTHxHEIGHT"));
}
