use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendtrend_analysis::{DEFAULT_EXPORT_FILE, DEFAULT_MIN_OCCURRENCES};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::spendtrend_home;

pub const DEFAULT_MAPPING_FILE: &str = "description_mapping.json";
pub const DEFAULT_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSection,
    pub files: FilesSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Trailing window when --days is not given
    pub days: u32,
    pub min_occurrences: usize,
    /// IANA zone for "now"; system local time when unset
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// Resolved against the working directory
    pub mapping: PathBuf,
    pub export: PathBuf,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            min_occurrences: DEFAULT_MIN_OCCURRENCES,
            timezone: None,
        }
    }
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            mapping: PathBuf::from(DEFAULT_MAPPING_FILE),
            export: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

/// `~/.spendtrend/config.toml`, or defaults when there is none.
pub fn load_config() -> Result<Config> {
    load_config_in(spendtrend_home().ok())
}

/// `config.toml` under `home`; defaults when there is no home to look in.
pub fn load_config_in(home: Option<PathBuf>) -> Result<Config> {
    match home {
        Some(home) => load_config_from(&home.join("config.toml")),
        None => {
            log::debug!("HOME is not set, using default config");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    log::debug!("loaded config from {}", p.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.analysis.days, 30);
        assert_eq!(cfg.analysis.min_occurrences, 2);
        assert_eq!(cfg.files.mapping, PathBuf::from("description_mapping.json"));
        assert_eq!(cfg.files.export, PathBuf::from("results.csv"));
    }

    #[test]
    fn test_no_home_gives_defaults() {
        assert_eq!(load_config_in(None).unwrap(), Config::default());
    }

    #[test]
    fn test_reads_config_under_home() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[analysis]\nmin_occurrences = 3\n").unwrap();
        let cfg = load_config_in(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(cfg.analysis.min_occurrences, 3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            "[analysis]\ndays = 90\ntimezone = \"America/Chicago\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.analysis.days, 90);
        assert_eq!(cfg.analysis.min_occurrences, 2);
        assert_eq!(cfg.analysis.timezone.as_deref(), Some("America/Chicago"));
        assert_eq!(cfg.files, FilesSection::default());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[analysis\ndays = ").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
