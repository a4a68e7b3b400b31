//! Transaction record types, before and after preprocessing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One CSV record exactly as loaded. Every value is still text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTransaction {
    /// 1-based line of the record in the source file
    pub line: u64,
    pub date: String,
    pub description: String,
    pub amount: String,
    /// Present only when the file carries a Balance column
    pub balance: Option<String>,
    /// Remaining columns, in header order
    pub extra: Vec<(String, String)>,
}

/// A cleaned debit inside the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Canonical (or trimmed lowercase) description
    pub description: String,
    /// Negative = money out
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }
}

/// Recurrence statistics for one canonical description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount_sum")]
    pub amount_sum: f64,
    #[serde(rename = "Amount_mean")]
    pub amount_mean: f64,
    #[serde(rename = "Transaction_count")]
    pub transaction_count: usize,
}

/// Round to two decimal places, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(-4.5), -4.5);
        assert_eq!(round2(-3.333333), -3.33);
        assert_eq!(round2(-2.675001), -2.68);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(-0.375), -0.38);
    }

    #[test]
    fn test_transaction_new() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let txn = Transaction::new(date, "coffee shop", -4.5);
        assert_eq!(txn.description, "coffee shop");
        assert!(txn.amount < 0.0);
    }
}
