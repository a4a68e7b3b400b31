//! Load a bank-account CSV export into [`RawTransaction`] rows.
//!
//! Expected header (extra columns are fine, order is free):
//!   Date,Description,Amount[,Balance]
//!
//! Nothing is typed here; `Amount` may still read `"-$1,200.00"`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use spendtrend_core::{RawTransaction, Result, TrendError};

pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Description", "Amount"];
const BALANCE_COLUMN: &str = "Balance";

/// Open `path` and read every record.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TrendError::file(path, e))?;
    read_transactions(file, path)
}

/// Read records from any reader; `source` is only used in error messages.
pub fn read_transactions<R: Read>(reader: R, source: &Path) -> Result<Vec<RawTransaction>> {
    let csv_err = |e: csv::Error| TrendError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let [Some(date_idx), Some(desc_idx), Some(amount_idx)] = REQUIRED_COLUMNS.map(column) else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|c| column(c).is_none())
            .map(|c| c.to_string())
            .collect();
        return Err(TrendError::MissingColumns {
            path: source.to_path_buf(),
            missing,
        });
    };
    let balance_idx = column(BALANCE_COLUMN);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                ![date_idx, desc_idx, amount_idx].contains(i) && Some(*i) != balance_idx
            })
            .map(|(i, h)| (h.clone(), cell(i)))
            .collect();

        rows.push(RawTransaction {
            line: record.position().map(|p| p.line()).unwrap_or(0),
            date: cell(date_idx),
            description: cell(desc_idx),
            amount: cell(amount_idx),
            balance: balance_idx.map(cell),
            extra,
        });
    }

    debug!(
        "loaded {} rows from {} (balance column: {})",
        rows.len(),
        source.display(),
        balance_idx.is_some()
    );
    Ok(rows)
}
