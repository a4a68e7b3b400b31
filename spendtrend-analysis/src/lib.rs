//! spendtrend-analysis: cleaning, recurring-spend aggregation, description
//! search and CSV export

pub mod export;
pub mod preprocess;
pub mod query;
pub mod trends;

pub use export::{DEFAULT_EXPORT_FILE, TREND_HEADER, export_trends, write_trends};
pub use preprocess::{PreprocessOptions, parse_amount, parse_date, preprocess};
pub use query::{QueryResult, filter_by_description};
pub use trends::{DEFAULT_MIN_OCCURRENCES, DescriptionGroup, aggregate, group_by_description};
