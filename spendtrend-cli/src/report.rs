//! Plain-text reports for the trend and query paths.

use comfy_table::{CellAlignment, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use spendtrend_analysis::{QueryResult, TREND_HEADER};
use spendtrend_core::TrendRow;

fn create_table(header: &[&str], right_aligned: &[usize]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    for &i in right_aligned {
        if let Some(column) = table.column_mut(i) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn trend_table(trends: &[TrendRow]) -> Table {
    let mut table = create_table(&TREND_HEADER, &[1, 2, 3]);
    for t in trends {
        table.add_row(vec![
            t.description.clone(),
            money(t.amount_sum),
            money(t.amount_mean),
            t.transaction_count.to_string(),
        ]);
    }
    table
}

pub fn query_table(result: &QueryResult) -> Table {
    let mut table = create_table(&["Date", "Description", "Amount"], &[2]);
    for t in &result.matches {
        table.add_row(vec![
            t.date.to_string(),
            t.description.clone(),
            money(t.amount),
        ]);
    }
    table
}

pub fn total_line(result: &QueryResult) -> String {
    format!(
        "Total Amount for '{}': {}",
        result.query,
        money(result.total)
    )
}

pub fn print_trends(trends: &[TrendRow]) {
    println!("{}", trend_table(trends));
}

pub fn print_query(result: &QueryResult) {
    println!("{}", query_table(result));
    println!("\n{}", total_line(result));
}
