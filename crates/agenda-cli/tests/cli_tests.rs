//! Integration tests for the `agenda` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the day, free, and
//! conflicts subcommands through the actual binary: stdin and file input,
//! human and JSON output, policy flags, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the schedule.json fixture (one faculty week in March
/// 2026; Monday the 2nd has a lecture-vs-meeting clash).
fn schedule_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schedule.json")
}

/// Helper: read the schedule fixture as a string.
fn schedule_json() -> String {
    std::fs::read_to_string(schedule_path()).expect("schedule.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// Day subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_renders_timeline_and_free_slots() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-02", "-i", schedule_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday 2026-03-02"))
        .stdout(predicate::str::contains("09:00-10:30  CS101 Lecture [official]"))
        .stdout(predicate::str::contains("10:00-11:00  Project Phoenix Meeting"))
        .stdout(predicate::str::contains("11:00-13:00  (120 min)"));
}

#[test]
fn day_reads_from_stdin() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-02"])
        .write_stdin(schedule_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("CS101 Lecture"));
}

#[test]
fn day_lists_all_day_items_separately() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-04", "-i", schedule_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All-day:"))
        .stdout(predicate::str::contains("- Grade midterms"));
}

#[test]
fn day_json_is_machine_readable() {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-02", "-i", schedule_path(), "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["timeline"]["busy"].as_array().unwrap().len(), 3);
    assert_eq!(view["timeline"]["busy"][0]["ref_id"], "cs101-mon");
    assert_eq!(view["free"].as_array().unwrap().len(), 2);
}

#[test]
fn day_writes_to_output_file() {
    let output_path = "/tmp/agenda-test-day-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "day",
            "--date",
            "2026-03-02",
            "-i",
            schedule_path(),
            "--json",
            "-o",
            output_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let view: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(view["timeline"]["date"], "2026-03-02");

    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Free subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_lists_slots_for_a_working_day() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["free", "--date", "2026-03-02", "-i", schedule_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free slots for Monday 2026-03-02"))
        .stdout(predicate::str::contains("11:00-13:00  (120 min)"))
        .stdout(predicate::str::contains("14:00-17:00  (180 min)"));
}

#[test]
fn free_min_filters_short_slots() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "free",
            "--date",
            "2026-03-02",
            "-i",
            schedule_path(),
            "--min",
            "150",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("14:00-17:00").and(predicate::str::contains("11:00-13:00").not()));
}

#[test]
fn free_on_saturday_prints_the_non_working_notice() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["free", "--date", "2026-03-07", "-i", schedule_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("non-working day, no free slots"));
}

#[test]
fn free_respects_custom_working_hours() {
    // 08:00-12:00 window: the merged 09:00-11:00 morning block leaves an
    // hour on either side; the afternoon office hours fall outside.
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "free",
            "--date",
            "2026-03-02",
            "-i",
            schedule_path(),
            "--work-start",
            "08:00",
            "--work-end",
            "12:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00-09:00  (60 min)"))
        .stdout(predicate::str::contains("11:00-12:00  (60 min)"));
}

#[test]
fn holiday_marker_is_decorative_by_default() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["free", "--date", "2026-03-05", "-i", schedule_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00-17:00  (480 min)"));
}

#[test]
fn holidays_block_flag_suppresses_marked_days() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "free",
            "--date",
            "2026-03-05",
            "-i",
            schedule_path(),
            "--holidays-block",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("non-working day, no free slots"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Conflicts subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_reports_the_week() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "conflicts",
            "--from",
            "2026-03-02",
            "--to",
            "2026-03-08",
            "-i",
            schedule_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 conflict(s)"))
        .stdout(predicate::str::contains(
            "Reschedule \"Project Phoenix Meeting\"",
        ))
        .stdout(predicate::str::contains("Manual review required"));
}

#[test]
fn conflicts_json_carries_records_and_narration() {
    let output = Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "conflicts",
            "--from",
            "2026-03-02",
            "--to",
            "2026-03-08",
            "-i",
            schedule_path(),
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = report.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["record"]["recommendation"], "RescheduleB");
    assert_eq!(items[0]["degraded"], false);
    assert!(items[0]["narration"]
        .as_str()
        .unwrap()
        .starts_with("Reschedule"));
    assert_eq!(items[1]["record"]["recommendation"], "ManualReview");
}

#[test]
fn conflicts_quiet_week_says_so() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "conflicts",
            "--from",
            "2026-03-09",
            "--to",
            "2026-03-10",
            "-i",
            schedule_path(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn malformed_document_fails_with_a_message() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-02"])
        .write_stdin("this is not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedule document"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args(["day", "--date", "2026-03-02", "-i", "/no/such/file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn inverted_working_hours_fail() {
    Command::cargo_bin("agenda")
        .unwrap()
        .args([
            "free",
            "--date",
            "2026-03-02",
            "-i",
            schedule_path(),
            "--work-start",
            "18:00",
            "--work-end",
            "09:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid working hours"));
}
