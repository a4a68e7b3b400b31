use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

/// Run the binary from `cwd` with an isolated HOME.
fn spendtrend(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spendtrend"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("RUST_LOG", "off")
        .output()
        .expect("run spendtrend")
}

fn workdir_with_mapping() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixture("description_mapping.json"),
        dir.path().join("description_mapping.json"),
    )
    .unwrap();
    dir
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn test_trend_report_and_export() {
    let dir = workdir_with_mapping();
    let csv = fixture("checking.csv");
    let out = spendtrend(
        dir.path(),
        &[csv.to_str().unwrap(), "--days", "100000", "--export"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let text = stdout(&out);
    assert!(text.contains("Transaction_count"));
    assert!(text.contains("coffee"));
    assert!(text.contains("-21.00"));
    assert!(!text.contains("rent"));
    assert!(text.contains("Results exported to 'results.csv'."));

    let exported = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert!(exported.starts_with("Description,Amount_sum,Amount_mean,Transaction_count\n"));
    assert_eq!(exported.lines().count(), 3);
}

#[test]
fn test_query_report() {
    let dir = workdir_with_mapping();
    let csv = fixture("checking.csv");
    let out = spendtrend(
        dir.path(),
        &[csv.to_str().unwrap(), "--days", "100000", "--raw", "--query", "coffee"],
    );
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("2024-01-01"));
    assert!(text.contains("2024-01-15"));
    assert!(text.contains("Total Amount for 'coffee': -9.00"));
}

#[test]
fn test_zero_day_window_is_empty_not_an_error() {
    let dir = workdir_with_mapping();
    let csv = fixture("checking.csv");
    let out = spendtrend(dir.path(), &[csv.to_str().unwrap(), "--days", "0", "--query", "x"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Total Amount for 'x': 0.00"));
}

#[test]
fn test_missing_mapping_file_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv = fixture("checking.csv");
    let out = spendtrend(dir.path(), &[csv.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("description_mapping.json"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = workdir_with_mapping();
    let out = spendtrend(dir.path(), &["does-not-exist.csv"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does-not-exist.csv"));
}

#[test]
fn test_unparseable_amount_fails() {
    let dir = workdir_with_mapping();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Date,Description,Amount\n2024-01-01,Coffee,lots\n").unwrap();
    let out = spendtrend(dir.path(), &[csv.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Amount"));
}

#[test]
fn test_runs_without_home() {
    let dir = workdir_with_mapping();
    let csv = fixture("checking.csv");
    let out = Command::new(env!("CARGO_BIN_EXE_spendtrend"))
        .args([csv.to_str().unwrap(), "--days", "100000"])
        .current_dir(dir.path())
        .env_remove("HOME")
        .env("RUST_LOG", "off")
        .output()
        .expect("run spendtrend");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("coffee"));
}
