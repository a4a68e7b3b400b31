//! Literal, case-insensitive description search.

use regex::RegexBuilder;
use spendtrend_core::description::fold;
use spendtrend_core::{Result, Transaction, TrendError};

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// The query as the user typed it
    pub query: String,
    pub matches: Vec<Transaction>,
    /// Sum of matched amounts, 0.0 when nothing matched
    pub total: f64,
}

/// Keep transactions whose description contains `query` as plain text.
/// Regex metacharacters in the query match themselves.
pub fn filter_by_description(transactions: &[Transaction], query: &str) -> Result<QueryResult> {
    let pattern = regex::escape(&fold(query));
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| TrendError::Query {
            query: query.to_string(),
            message: e.to_string(),
        })?;

    let matches: Vec<Transaction> = transactions
        .iter()
        .filter(|t| !t.description.is_empty() && re.is_match(&t.description))
        .cloned()
        .collect();
    // fold from +0.0: an empty f64 sum is -0.0 and would print as "-0.00"
    let total = matches.iter().fold(0.0, |acc, t| acc + t.amount);

    Ok(QueryResult {
        query: query.to_string(),
        matches,
        total,
    })
}
