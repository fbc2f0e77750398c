//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;

use labid::cassette::recorder::CassetteRecorder;

fn run_labid(args: &[&str], env: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_labid");
    let mut command = Command::new(bin);
    command.args(args);
    for key in ["LABID_REPLAY", "LABID_RECORD", "LABID_API_URL", "LABID_PREFIX"] {
        command.env_remove(key);
    }
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("failed to run labid binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn ulr_for_new_year_2025() {
    let output = run_labid(&["ulr", "--created-at", "2025-01-01T00:00:00.000Z", "--year", "2025"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "TC874925735689600F");
}

#[test]
fn test_id_at_explicit_time() {
    let output = run_labid(&["test-id", "--count", "0", "--at", "2025-04-15T08:00:00Z"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ATL/25/04/T_1");
}

#[test]
fn prefix_comes_from_environment() {
    let output = run_labid(
        &["test-id", "--count", "11", "--at", "2025-04-15T08:00:00Z"],
        &[("LABID_PREFIX", "LAB")],
    );
    assert_eq!(stdout(&output), "LAB/25/04/T_12");
}

#[test]
fn material_ids_with_known_last_number() {
    let output =
        run_labid(&["material-ids", "--count", "3", "--year", "25", "--month", "04", "--last", "10"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ATL/25/04/11\nATL/25/04/12\nATL/25/04/13");
}

#[test]
fn material_ids_from_replayed_counter() {
    let dir = temp_dir("labid_cli_replay_counter");
    let cassette = dir.join("counter.cassette.yaml");
    let mut recorder = CassetteRecorder::new(&cassette, "cli-counter");
    recorder.record("clock", "now", json!(null), json!("2025-04-15T09:00:00Z"));
    recorder.record("counter", "last_number", json!({"year": "25", "month": "04"}), json!({"ok": 41}));
    recorder.finish().unwrap();

    let output = run_labid(
        &["material-ids", "--count", "2"],
        &[("LABID_REPLAY", cassette.to_str().unwrap())],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "ATL/25/04/42\nATL/25/04/43");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreachable_counter_fails_without_ids() {
    let output = run_labid(
        &["material-ids", "--count", "2", "--year", "25", "--month", "04"],
        &[("LABID_API_URL", "http://127.0.0.1:9/api"), ("LABID_TIMEOUT_SECS", "2")],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr.contains("sequence counter unavailable"), "{stderr}");
}

#[test]
fn role_lookup() {
    let output = run_labid(&["role", "3"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Section Head (Mechanical)\t/sectionhead");

    let output = run_labid(&["role", "9"], &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown role code 9"));
}

#[test]
fn report_regions_and_set() {
    let dir = temp_dir("labid_cli_report");
    let report = dir.join("report.html");
    std::fs::write(
        &report,
        "<h1>Report</h1><table><tr><td>Slump</td><td>75 mm</td></tr></table>",
    )
    .unwrap();
    let path = report.to_str().unwrap();

    let output = run_labid(&["report", "regions", path], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\ttd\tSlump\n1\ttd\t75 mm");

    let output = run_labid(&["report", "set", path, "--region", "1", "--text", "80 mm"], &[]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(Path::new(path)).unwrap(),
        "<h1>Report</h1><table><tr><td>Slump</td><td>80 mm</td></tr></table>"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_labid(&["nonsense"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
