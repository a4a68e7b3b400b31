use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendError>;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A cell that could not be converted to its typed form.
    #[error("line {line}: cannot parse {column} value {value:?}")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("invalid description mapping {}: {source}", path.display())]
    Mapping {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timezone: {0}")]
    Timezone(String),

    #[error("invalid query {query:?}: {message}")]
    Query { query: String, message: String },

    #[error("cannot write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TrendError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: u64, column: &'static str, value: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_line_and_column() {
        let err = TrendError::parse(7, "Amount", "abc");
        assert_eq!(err.to_string(), "line 7: cannot parse Amount value \"abc\"");
    }

    #[test]
    fn test_missing_columns_lists_all() {
        let err = TrendError::MissingColumns {
            path: PathBuf::from("tx.csv"),
            missing: vec!["Date".to_string(), "Amount".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "tx.csv: missing required column(s): Date, Amount"
        );
    }
}
