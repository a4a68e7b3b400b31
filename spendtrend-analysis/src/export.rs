//! Write trend rows as CSV (header, no index column).

use std::io::Write;
use std::path::Path;

use spendtrend_core::{Result, TrendError, TrendRow};

pub const DEFAULT_EXPORT_FILE: &str = "results.csv";
pub const TREND_HEADER: [&str; 4] = [
    "Description",
    "Amount_sum",
    "Amount_mean",
    "Transaction_count",
];

/// Write `trends` to any writer. The header is written even when empty.
pub fn write_trends<W: Write>(
    trends: &[TrendRow],
    writer: W,
) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(TREND_HEADER)?;
    for row in trends {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `trends` into it.
pub fn export_trends(trends: &[TrendRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let export_err = |source: csv::Error| TrendError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|e| TrendError::file(path, e))?;
    write_trends(trends, file).map_err(export_err)?;
    log::debug!("wrote {} trend rows to {}", trends.len(), path.display());
    Ok(())
}
