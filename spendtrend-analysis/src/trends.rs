//! Recurring-spend aggregation: group by canonical description, keep groups
//! seen at least `min_occurrences` times, summarize each.

use std::collections::HashMap;

use log::debug;
use spendtrend_core::{Transaction, TrendRow, round2};

/// A description seen only once is not recurring.
pub const DEFAULT_MIN_OCCURRENCES: usize = 2;

/// All transactions sharing one canonical description
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionGroup<'a> {
    pub description: &'a str,
    pub rows: Vec<&'a Transaction>,
}

impl DescriptionGroup<'_> {
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|t| t.amount).sum()
    }

    fn to_trend(&self) -> TrendRow {
        let count = self.rows.len();
        let sum = self.total();
        TrendRow {
            description: self.description.to_string(),
            amount_sum: sum,
            amount_mean: round2(sum / count as f64),
            transaction_count: count,
        }
    }
}

/// Group transactions by description. Groups come back in the order their
/// description first appears; rows keep input order within a group.
pub fn group_by_description(transactions: &[Transaction]) -> Vec<DescriptionGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<DescriptionGroup<'_>> = Vec::new();

    for txn in transactions {
        let slot = *index.entry(txn.description.as_str()).or_insert_with(|| {
            groups.push(DescriptionGroup {
                description: &txn.description,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(txn);
    }

    groups
}

/// Recurring descriptions, most frequent first. Equal counts keep first-seen
/// order.
pub fn aggregate(transactions: &[Transaction], min_occurrences: usize) -> Vec<TrendRow> {
    let groups = group_by_description(transactions);
    let group_count = groups.len();

    let mut trends: Vec<TrendRow> = groups
        .iter()
        .filter(|g| g.rows.len() >= min_occurrences)
        .map(DescriptionGroup::to_trend)
        .collect();

    // sort_by is stable
    trends.sort_by(|a, b| b.transaction_count.cmp(&a.transaction_count));

    debug!(
        "{} of {} descriptions recur at least {} times",
        trends.len(),
        group_count,
        min_occurrences
    );
    trends
}
