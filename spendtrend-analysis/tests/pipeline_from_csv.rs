use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use spendtrend_analysis::{
    DEFAULT_MIN_OCCURRENCES, PreprocessOptions, aggregate, export_trends, filter_by_description,
    preprocess,
};
use spendtrend_core::{DescriptionMap, Transaction, TrendRow};
use spendtrend_ingest::{load_transactions, read_transactions};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn load(days: u32, use_mapping: bool) -> Vec<Transaction> {
    let rows = load_transactions(fixture("checking.csv")).unwrap();
    let map = DescriptionMap::load(fixture("description_mapping.json")).unwrap();
    preprocess(rows, &PreprocessOptions { days, use_mapping }, &map, now()).unwrap()
}

const THREE_ROWS: &str = "\
Date,Description,Amount
2024-01-01,Coffee Shop,-$4.50
2024-01-15,Coffee Shop,-4.50
2024-02-01,Rent,-1200.00
";

fn three_rows() -> Vec<Transaction> {
    let rows = read_transactions(THREE_ROWS.as_bytes(), Path::new("inline.csv")).unwrap();
    let opts = PreprocessOptions {
        days: 365,
        use_mapping: true,
    };
    preprocess(rows, &opts, &DescriptionMap::empty(), now()).unwrap()
}

#[test]
fn test_recurring_coffee_only() {
    let trends = aggregate(&three_rows(), DEFAULT_MIN_OCCURRENCES);
    assert_eq!(
        trends,
        vec![TrendRow {
            description: "coffee shop".to_string(),
            amount_sum: -9.0,
            amount_mean: -4.5,
            transaction_count: 2,
        }]
    );
}

#[test]
fn test_query_coffee_total() {
    let res = filter_by_description(&three_rows(), "coffee").unwrap();
    assert_eq!(res.matches.len(), 2);
    assert_eq!(res.total, -9.0);
    assert_eq!(format!("{:.2}", res.total), "-9.00");
}

#[test]
fn test_mapped_fixture_trends() {
    let txns = load(365, true);
    // payroll is a credit
    assert_eq!(txns.len(), 7);
    assert!(txns.iter().all(|t| t.amount < 0.0));

    let trends = aggregate(&txns, DEFAULT_MIN_OCCURRENCES);
    let summary: Vec<_> = trends
        .iter()
        .map(|t| (t.description.as_str(), t.amount_sum, t.amount_mean, t.transaction_count))
        .collect();
    assert_eq!(
        summary,
        [("coffee", -21.0, -5.25, 4), ("netflix", -30.98, -15.49, 2)]
    );
}

#[test]
fn test_raw_fixture_trends_tie_in_input_order() {
    let trends = aggregate(&load(365, false), DEFAULT_MIN_OCCURRENCES);
    let names: Vec<_> = trends.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, ["coffee shop", "netflix.com"]);
}

#[test]
fn test_short_window_has_no_recurring() {
    let txns = load(30, true);
    assert_eq!(txns.len(), 2);
    assert!(aggregate(&txns, DEFAULT_MIN_OCCURRENCES).is_empty());
    assert!(load(0, true).is_empty());
}

#[test]
fn test_query_after_mapping_matches_canonical_label() {
    let res = filter_by_description(&load(365, true), "COFFEE").unwrap();
    assert_eq!(res.matches.len(), 4);
    assert_eq!(res.total, -21.0);

    let res = filter_by_description(&load(365, false), "coffee").unwrap();
    assert_eq!(res.matches.len(), 2);
}

#[test]
fn test_export_fixture_trends() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.csv");
    export_trends(&aggregate(&load(365, true), 2), &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Description,Amount_sum,Amount_mean,Transaction_count",
            "coffee,-21.0,-5.25,4",
            "netflix,-30.98,-15.49,2",
        ]
    );
}
