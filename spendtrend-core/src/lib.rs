//! spendtrend-core: shared types for the spending-trend pipeline

pub mod description;
pub mod error;
pub mod time;
pub mod transaction;

pub use description::DescriptionMap;
pub use error::{Result, TrendError};
pub use time::{cutoff, local_now};
pub use transaction::{RawTransaction, Transaction, TrendRow, round2};
