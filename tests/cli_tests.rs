#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_reports_summary_for_a_program() {
    run_cli(
        "range 2024-01-01 2024-01-14\n\
         day mon on\n\
         day wed on\n\
         time mon 18:00 19:00\n\
         time wed 18:00 19:30\n\
         summary\n\
         quit\n",
    )
    .success()
    .stdout(str_contains("Selected days    : 4"))
    .stdout(str_contains("Total minutes    : 300"))
    .stdout(str_contains("Weeks in range   : 2"));
}

#[test]
fn cli_rejects_malformed_dates() {
    run_cli("range yesterday tomorrow\nquit\n")
        .success()
        .stdout(str_contains("Usage: range <start> <end>"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "range 2024-01-01 2024-01-14\nday mon on\ntime mon 18:00 19:00\nsave json {}\n\
         day mon off\nload json {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Program loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output.split("Program loaded from").last().unwrap_or_default();
    assert!(
        after_reload.contains("MONDAY 18:00-19:00"),
        "persisted schedule should survive the reload:\n{}",
        after_reload
    );
}

#[test]
fn cli_exports_summary_csv() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "range 2024-01-01 2024-01-07\nday mon on\ntime mon 18:00 19:00\nexport csv {}\nquit\n",
        path
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Summary exported to"));
    let text = std::fs::read_to_string(tmp.path()).expect("read exported csv");
    assert!(text.starts_with("fecha,dow,minutos"));
    assert!(text.contains("semanas_del_rango,1"));
}

#[test]
fn cli_export_without_range_reports_the_error() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    run_cli(&format!("export ics {}\nquit\n", path))
        .success()
        .stdout(str_contains("Error exporting calendar: no range defined"));
}

#[test]
fn cli_outside_pin_round_trip() {
    run_cli(
        "range 2024-01-01 2024-01-31\n\
         outside 2024-02-10\n\
         outside 2024-02-10\n\
         quit\n",
    )
    .success()
    .stdout(str_contains("Outside pin: 2024-02-10."))
    .stdout(str_contains("Outside pin cleared."));
}
