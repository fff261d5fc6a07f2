//! Interactive session tests for the yoga binary.
//!
//! Sessions are seeded with `--text` so no microphone or network is needed,
//! and the commands are scripted over stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

fn session(temp_dir: &TempDir, text: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("yoga"));
    cmd.arg("--config")
        .arg(temp_dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("session")
        .arg("--text")
        .arg(text);
    cmd
}

fn run(temp_dir: &TempDir, text: &str, stdin: &str) -> String {
    let output = session(temp_dir, text)
        .write_stdin(stdin)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn test_session_shows_initial_routine() {
    let temp_dir = setup_test_dir();

    session(&temp_dir, "I have shoulder pain")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You said: 'I have shoulder pain'"))
        .stdout(predicate::str::contains("Detected Pain Area: Shoulder"))
        .stdout(predicate::str::contains("  1. Thread the Needle"))
        .stdout(predicate::str::contains("Namaste!"));
}

#[test]
fn test_move_export_and_reset() {
    let temp_dir = setup_test_dir();

    let stdout = run(
        &temp_dir,
        "I have shoulder pain",
        "up 3\nexport\nreset\nexport\nq\n",
    );

    let moved = "1. Thread the Needle\n2. Cow Face Pose\n3. Eagle Arms\n4. Reverse Prayer\n5. Shoulder Rolls";
    let original = "1. Thread the Needle\n2. Eagle Arms\n3. Cow Face Pose\n4. Reverse Prayer\n5. Shoulder Rolls";

    let moved_at = stdout.find(moved).expect("moved export missing");
    let reset_at = stdout.find("Routine reset to original order.").expect("reset missing");
    let original_at = stdout.rfind(original).expect("original export missing");

    assert!(moved_at < reset_at);
    assert!(reset_at < original_at);
    assert!(stdout.contains("Routine: 1. Thread the Needle → 2. Cow Face Pose → 3. Eagle Arms"));
}

#[test]
fn test_move_down_short_form() {
    let temp_dir = setup_test_dir();

    let stdout = run(&temp_dir, "my knee clicks", "d 1\ne\n");

    assert!(stdout.contains("1. Bridge Pose\n2. Hero Pose\n3. Wall Sit\n4. Chair Pose\n5. Low Lunge"));
}

#[test]
fn test_boundary_moves_are_reported() {
    let temp_dir = setup_test_dir();

    let stdout = run(&temp_dir, "my hip", "up 1\ndown 5\ndown 9\nexport\n");

    assert!(stdout.contains("Pose 1 can't move up."));
    assert!(stdout.contains("Pose 5 can't move down."));
    assert!(stdout.contains("Pose 9 can't move down."));
    assert!(stdout.contains(
        "1. Pigeon Pose\n2. Garland Pose\n3. Lizard Pose\n4. Butterfly Pose\n5. Bridge Pose"
    ));
}

#[test]
fn test_bad_input_keeps_session_alive() {
    let temp_dir = setup_test_dir();

    let stdout = run(&temp_dir, "feeling fine", "dance\nup zero\nup 0\nhelp\nexport\n");

    assert!(stdout.contains("Unknown command 'dance'"));
    assert!(stdout.contains("Invalid position 'zero'"));
    assert!(stdout.contains("Positions start at 1"));
    assert!(stdout.contains("reset / r"));
    assert!(stdout.contains(
        "1. Mountain Pose\n2. Tree Pose\n3. Corpse Pose\n4. Butterfly Pose\n5. Legs Up the Wall"
    ));
    assert!(stdout.contains("Namaste!"));
}

#[test]
fn test_general_routine_reset() {
    let temp_dir = setup_test_dir();

    let stdout = run(&temp_dir, "I feel great today", "u 5\nr\ne\n");

    assert!(stdout.contains("Your General Yoga Routine:"));
    assert!(stdout.contains("4. Legs Up the Wall → 5. Butterfly Pose"));
    assert!(stdout.contains(
        "1. Mountain Pose\n2. Tree Pose\n3. Corpse Pose\n4. Butterfly Pose\n5. Legs Up the Wall"
    ));
}
