use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use spendtrend_analysis::{
    PreprocessOptions, aggregate, export_trends, filter_by_description, preprocess,
};
use spendtrend_core::{DescriptionMap, Transaction, local_now};
use spendtrend_ingest::load_transactions;
use std::path::PathBuf;

mod charts;
mod completion;
mod config;
mod report;
mod state;

use config::Config;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SPENDTREND_BUILD_SHA"),
    ")"
);

/// Recurring spending trends from a bank-account CSV export
#[derive(Parser, Debug)]
#[command(name = "spendtrend", version = VERSION)]
struct Cli {
    /// CSV export with Date, Description and Amount columns
    #[arg(required_unless_present = "install_completion")]
    file_path: Option<PathBuf>,

    /// Show charts of the trends after the report
    #[arg(long)]
    show_visualization: bool,

    /// Number of days in the past to look at transactions [default: 30]
    #[arg(long)]
    days: Option<u32>,

    /// Only list transactions whose description contains this text
    #[arg(long)]
    query: Option<String>,

    /// Ignore the description mapping
    #[arg(long)]
    raw: bool,

    /// Install shell completion and exit
    #[arg(long)]
    install_completion: bool,

    /// Write the trend table to results.csv
    #[arg(long)]
    export: bool,

    /// Occurrences needed for a description to count as recurring [default: 2]
    #[arg(long)]
    min_occurrences: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.install_completion {
        let shell = completion::install(&mut Cli::command())?;
        println!("Completion installed for {shell}.");
        return Ok(());
    }

    let config = config::load_config()?;
    let map = DescriptionMap::load(&config.files.mapping).with_context(|| {
        format!(
            "loading description mapping {}",
            config.files.mapping.display()
        )
    })?;
    let now = local_now(config.analysis.timezone.as_deref())?;

    let Some(file_path) = cli.file_path.as_ref() else {
        bail!("FILE_PATH is required");
    };
    if !file_path.exists() {
        bail!("File not found: {}", file_path.display());
    }

    let rows = load_transactions(file_path)
        .with_context(|| format!("loading {}", file_path.display()))?;
    let options = PreprocessOptions {
        days: cli.days.unwrap_or(config.analysis.days),
        use_mapping: !cli.raw,
    };
    let transactions = preprocess(rows, &options, &map, now)
        .with_context(|| format!("preprocessing {}", file_path.display()))?;

    match cli.query.as_deref().filter(|q| !q.is_empty()) {
        Some(query) => run_query(&cli, &transactions, query),
        None => run_trends(&cli, &config, &transactions),
    }
}

fn run_query(cli: &Cli, transactions: &[Transaction], query: &str) -> Result<()> {
    if cli.export {
        log::warn!("--export only applies to the trend report; ignoring");
    }
    if cli.show_visualization {
        log::warn!("--show-visualization only applies to the trend report; ignoring");
    }

    let result = filter_by_description(transactions, query)?;
    report::print_query(&result);
    Ok(())
}

fn run_trends(cli: &Cli, config: &Config, transactions: &[Transaction]) -> Result<()> {
    let min_occurrences = cli
        .min_occurrences
        .unwrap_or(config.analysis.min_occurrences);
    let trends = aggregate(transactions, min_occurrences);

    report::print_trends(&trends);

    if cli.show_visualization {
        charts::show_charts(&trends).context("rendering charts")?;
    }

    if cli.export {
        let out = &config.files.export;
        export_trends(&trends, out).with_context(|| format!("exporting to {}", out.display()))?;
        println!("Results exported to '{}'.", out.display());
    }

    Ok(())
}
