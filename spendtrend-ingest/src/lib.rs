//! spendtrend-ingest: bank-export CSV loading into untyped transaction rows.

pub mod loader;

pub use loader::{REQUIRED_COLUMNS, load_transactions, read_transactions};
