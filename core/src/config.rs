use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "payroll_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Label preceding the pool amount in a ledger tag, matched case-insensitively.
    #[serde(default = "default_pool_tag_label")]
    pub pool_tag_label: String,
    /// Relative to the data directory.
    #[serde(default = "default_roster_file")]
    pub roster_file: String,
    /// Relative to the data directory.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// chrono formats tried in order. RFC 3339 is always accepted as well.
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    /// Visit class 0/1 roster entries in batch runs. They never receive rows.
    #[serde(default)]
    pub batch_include_ineligible: bool,
}

fn default_pool_tag_label() -> String {
    "pbp".into()
}

fn default_roster_file() -> String {
    "roster/roster.json".into()
}

fn default_ledger_file() -> String {
    "ledger/jobs.json".into()
}

fn default_date_formats() -> Vec<String> {
    vec!["%Y-%m-%d".into(), "%m/%d/%Y".into(), "%m/%d/%y".into()]
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            pool_tag_label:           default_pool_tag_label(),
            roster_file:              default_roster_file(),
            ledger_file:              default_ledger_file(),
            date_formats:             default_date_formats(),
            batch_include_ineligible: false,
        }
    }
}

impl PayrollConfig {
    /// Load from the data/ directory.
    /// A missing config file is not an error: defaults apply.
    /// In tests, use PayrollConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        if !Path::new(&path).exists() {
            log::info!("config: {path} not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PayrollConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        if config.pool_tag_label.trim().is_empty() {
            anyhow::bail!("{path}: pool_tag_label must not be empty");
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }

    pub fn roster_path(&self, data_dir: &str) -> PathBuf {
        Path::new(data_dir).join(&self.roster_file)
    }

    pub fn ledger_path(&self, data_dir: &str) -> PathBuf {
        Path::new(data_dir).join(&self.ledger_file)
    }
}
