use anyhow::{Context, Result};
use std::path::PathBuf;

/// `~/.spendtrend`, home of the config file and generated completions.
pub fn spendtrend_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendtrend"))
}
