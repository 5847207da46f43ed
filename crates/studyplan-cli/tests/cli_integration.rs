//! CLI E2E tests.
//!
//! Tests run the built binary against tables in a temporary directory. HOME
//! points at the same directory so configuration never touches the real one.

use std::fs;
use std::path::Path;
use std::process::Command;

use indoc::indoc;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyplan"))
        .args(args)
        .env("HOME", home)
        .env_remove("STUDYPLAN_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn write_tables(dir: &Path) {
    fs::write(
        dir.join("hour_grade.csv"),
        indoc! {"
            Weekday,Window 1
            Sunday,
            Monday,10:00-12:00
            Tuesday,
            Wednesday,
            Thursday,
            Friday,
            Saturday,
        "},
    )
    .unwrap();
    fs::write(
        dir.join("disciplines.csv"),
        indoc! {"
            Name,Source,DailyLimit,ContentGap,SubjectGap
            Math,math.csv,01:00:00,00:00:00,00:00:00
        "},
    )
    .unwrap();
    fs::write(
        dir.join("math.csv"),
        indoc! {"
            Subject,Title,Duration,Reference
            Algebra,Groups,00:20:00,Ch. 1
            Algebra,Rings,00:20:00,Ch. 2
        "},
    )
    .unwrap();
}

fn path_arg(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().into_owned()
}

#[test]
fn test_plan_writes_output_table() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let calendar = path_arg(dir.path(), "hour_grade.csv");
    let disciplines = path_arg(dir.path(), "disciplines.csv");
    let output = path_arg(dir.path(), "planner.csv");

    let stdout = run_cli_success(
        dir.path(),
        &[
            "plan",
            "2024-03-04",
            "--calendar",
            &calendar,
            "--disciplines",
            &disciplines,
            "--output",
            &output,
        ],
    );

    assert!(stdout.contains("planned 2 sessions"), "{stdout}");
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        indoc! {"
            Datetime,Discipline,Subject,Title,Reference,Duration
            2024-03-04T10:00:00Z,Math,Algebra,Groups,Ch. 1,00:20:00
            2024-03-04T10:20:00Z,Math,Algebra,Rings,Ch. 2,00:20:00
        "}
    );
}

#[test]
fn test_plan_json_streaming() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let calendar = path_arg(dir.path(), "hour_grade.csv");
    let disciplines = path_arg(dir.path(), "disciplines.csv");

    let stdout = run_cli_success(
        dir.path(),
        &[
            "plan",
            "2024-03-05",
            "--calendar",
            &calendar,
            "--disciplines",
            &disciplines,
            "--streaming",
            "--json",
        ],
    );

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Tuesday has no window, so the plan starts the following Monday
    assert_eq!(entries[0]["at"], "2024-03-11T10:00:00Z");
    assert_eq!(entries[1]["title"], "Rings");
    assert_eq!(report["summary"]["entries"], 2);
}

#[test]
fn test_plan_reports_unplayable_content() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    fs::write(
        dir.path().join("math.csv"),
        "Subject,Title,Duration,Reference\nAlgebra,Marathon,03:00:00,\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("disciplines.csv"),
        "Name,Source,DailyLimit,ContentGap,SubjectGap\nMath,math.csv,08:00:00,00:00:00,00:00:00\n",
    )
    .unwrap();
    let calendar = path_arg(dir.path(), "hour_grade.csv");
    let disciplines = path_arg(dir.path(), "disciplines.csv");

    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "plan",
            "2024-03-04",
            "--calendar",
            &calendar,
            "--disciplines",
            &disciplines,
            "--max-attempts",
            "1",
            "--json",
        ],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");
    assert!(stderr.contains("unplayable"), "{stderr}");
}

#[test]
fn test_plan_missing_calendar_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let disciplines = path_arg(dir.path(), "disciplines.csv");
    let calendar = path_arg(dir.path(), "nope.csv");

    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "plan",
            "2024-03-04",
            "--calendar",
            &calendar,
            "--disciplines",
            &disciplines,
            "--json",
        ],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("nope.csv"), "{stderr}");
}

#[test]
fn test_failed_load_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let disciplines = path_arg(dir.path(), "disciplines.csv");
    let calendar = path_arg(dir.path(), "nope.csv");
    let output = path_arg(dir.path(), "planner.csv");
    fs::write(&output, "previous plan\n").unwrap();

    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "plan",
            "2024-03-04",
            "--calendar",
            &calendar,
            "--disciplines",
            &disciplines,
            "--output",
            &output,
        ],
    );

    assert_eq!(code, 1, "{stderr}");
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous plan\n");
}

#[test]
fn test_plan_rejects_zero_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["plan", "--max-attempts", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_calendar_show() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let calendar = path_arg(dir.path(), "hour_grade.csv");

    let stdout = run_cli_success(dir.path(), &["calendar", "show", "--calendar", &calendar]);

    let monday = stdout
        .lines()
        .find(|line| line.starts_with("Monday"))
        .unwrap();
    assert!(monday.ends_with("10:00-12:00"), "{monday}");
    assert!(stdout.lines().any(|line| line.starts_with("Sunday") && line.ends_with('-')));
}

#[test]
fn test_disciplines_list() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path());
    let disciplines = path_arg(dir.path(), "disciplines.csv");

    let stdout = run_cli_success(
        dir.path(),
        &["disciplines", "list", "--disciplines", &disciplines, "--json"],
    );

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["name"], "Math");
    assert_eq!(rows[0]["items"], 2);
    assert_eq!(rows[0]["total"], "00:40:00");
}

#[test]
fn test_config_set_get_reset() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "planner.max_attempts"]).trim(),
        "7"
    );
    run_cli_success(dir.path(), &["config", "set", "planner.max_attempts", "3"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "planner.max_attempts"]).trim(),
        "3"
    );
    assert!(dir.path().join(".config/studyplan/config.toml").exists());

    let listed = run_cli_success(dir.path(), &["config", "list"]);
    assert!(listed.contains("planner.max_attempts = 3"), "{listed}");

    run_cli_success(dir.path(), &["config", "reset"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "planner.max_attempts"]).trim(),
        "7"
    );
}

#[test]
fn test_config_rejects_unknown_key_and_bad_value() {
    let dir = tempfile::tempdir().unwrap();

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "planner.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"), "{stderr}");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "planner.storage", "cloud"]);
    assert_eq!(code, 1);
}
