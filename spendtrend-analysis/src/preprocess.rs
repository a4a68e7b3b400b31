//! Turn loaded rows into typed debits inside the trailing window.
//!
//! Order: amounts are parsed for every row first (a bad amount anywhere is
//! fatal), then credits are dropped, then dates are parsed, then the window
//! is applied, then descriptions are normalized.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use spendtrend_core::{DescriptionMap, RawTransaction, Result, Transaction, TrendError, cutoff};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // two-digit year first: %Y would read "24" as year 0024
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Trailing window size in days
    pub days: u32,
    /// Look descriptions up in the mapping (false = `--raw`)
    pub use_mapping: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            days: 30,
            use_mapping: true,
        }
    }
}

/// Strip `$` and `,` and parse. A blank cell is a missing value (`Ok(None)`).
pub fn parse_amount(raw: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned.parse().map(Some)
}

/// Parse the calendar date of a cell, discarding any time of day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Clean `rows` into debits dated on or after `now - days`.
pub fn preprocess(
    rows: Vec<RawTransaction>,
    options: &PreprocessOptions,
    map: &DescriptionMap,
    now: NaiveDateTime,
) -> Result<Vec<Transaction>> {
    let total = rows.len();

    // Balance (and any other extra column) is dropped by destructuring.
    let mut debits = Vec::with_capacity(rows.len());
    for RawTransaction {
        line,
        date,
        description,
        amount,
        ..
    } in rows
    {
        let parsed = match parse_amount(&amount) {
            Ok(parsed) => parsed,
            Err(_) => return Err(TrendError::parse(line, "Amount", amount)),
        };
        // NaN and blanks never compare below zero
        if let Some(value) = parsed.filter(|v| *v < 0.0) {
            debits.push((line, date, description, value));
        }
    }
    debug!("{} of {} rows are debits", debits.len(), total);

    let window_start = cutoff(now, options.days);
    let mut out = Vec::with_capacity(debits.len());
    for (line, date, description, amount) in debits {
        let date =
            parse_date(&date).ok_or_else(|| TrendError::parse(line, "Date", date.as_str()))?;
        if date.and_time(NaiveTime::MIN) < window_start {
            continue;
        }
        out.push(Transaction::new(
            date,
            map.normalize(&description, options.use_mapping),
            amount,
        ));
    }
    debug!(
        "{} debits on or after {} (last {} days)",
        out.len(),
        window_start,
        options.days
    );

    Ok(out)
}
