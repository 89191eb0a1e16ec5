//! Job ledger: raw rows from the job-level export, parsed into
//! `JobRecord`s.
//!
//! Pool grammar: `<label>\s*(\d+(\.\d+)?)`, case-insensitive, where the
//! label comes from config (default "pbp"). A row without a match is not
//! pool-bearing and carries a zero pool; it is valid but pays nothing.

use crate::{
    config::PayrollConfig,
    error::{PayrollError, PayrollResult, RecordError},
    roster::{name_key, Roster},
    types::{DedupKey, Money},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One row exactly as exported. Every field is free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerRow {
    pub customer_name:         String,
    pub job_business_unit:     String,
    pub completion_date:       String,
    pub item_name:             String,
    pub pool_tag:              String,
    pub primary_technician:    String,
    pub assigned_technicians:  String,
}

#[derive(Debug, Clone, Deserialize)]
struct LedgerFile {
    jobs: Vec<LedgerRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub customer_name:        String,
    pub job_business_unit:    String,
    pub completion_date:      NaiveDate,
    pub item_name:            String,
    /// Dollars available for the whole team. Zero when untagged.
    pub pool_amount:          Money,
    pub primary_technician:   String,
    pub assigned_technicians: String,
}

impl JobRecord {
    /// Primary first, then assigned names in order, split on list
    /// separators only. Used to validate rows before a roster exists.
    pub fn technician_names(&self) -> Vec<String> {
        unique_names(self.raw_names())
    }

    /// Like `technician_names`, but space-separated pieces are broken
    /// into roster names ("Bob Dana" -> "Bob", "Dana") while "First
    /// Last" roster names stay whole. The primary is kept verbatim.
    pub fn technician_names_in(&self, roster: &Roster) -> Vec<String> {
        let primary = self.primary_technician.trim();
        let assigned = split_technician_list(&self.assigned_technicians)
            .into_iter()
            .flat_map(|piece| roster.split_names(&piece));
        let names = std::iter::once(primary.to_string())
            .filter(|p| !p.is_empty())
            .chain(assigned);
        unique_names(names)
    }

    fn raw_names(&self) -> impl Iterator<Item = String> {
        let primary = self.primary_technician.trim().to_string();
        std::iter::once(primary)
            .filter(|p| !p.is_empty())
            .chain(split_technician_list(&self.assigned_technicians))
    }

    pub fn dedup_key(&self) -> DedupKey {
        dedup_key(&self.customer_name, self.completion_date, &self.item_name, self.pool_amount)
    }

    pub fn has_pool(&self) -> bool {
        self.pool_amount > 0.0
    }
}

pub fn dedup_key(customer: &str, date: NaiveDate, item: &str, pool: Money) -> DedupKey {
    format!("{customer}|{}|{item}|{pool}", date.format("%Y-%m-%d"))
}

/// Case-insensitive de-duplication; the first spelling seen is kept.
fn unique_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.filter(|n| seen.insert(name_key(n))).collect()
}

/// Split a free-text technician list on list separators. Pieces may
/// still hold several space-separated names; see `Roster::split_names`.
pub fn split_technician_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '/', '&', '+', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns raw rows into job records using the configured grammar and
/// date formats.
#[derive(Debug, Clone)]
pub struct RowParser {
    pool_pattern: Regex,
    date_formats: Vec<String>,
}

impl RowParser {
    pub fn new(config: &PayrollConfig) -> PayrollResult<Self> {
        let label = regex::escape(config.pool_tag_label.trim());
        let pool_pattern = Regex::new(&format!(r"(?i){label}\s*(\d+(?:\.\d+)?)"))
            .map_err(|e| anyhow::anyhow!("invalid pool tag label '{}': {e}", config.pool_tag_label))?;
        Ok(Self {
            pool_pattern,
            date_formats: config.date_formats.clone(),
        })
    }

    /// Pool amount from a tag such as "PBP 150" or "pbp150.50".
    /// `None` when the tag carries no pool.
    pub fn pool_amount(&self, tag: &str) -> Option<Money> {
        self.pool_pattern
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|amount| amount.is_finite())
    }

    pub fn completion_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(ts.date());
        }
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    pub fn parse(&self, row: &LedgerRow) -> Result<JobRecord, RecordError> {
        let customer_name = row.customer_name.trim();
        if customer_name.is_empty() {
            return Err(RecordError::MissingCustomer);
        }
        let item_name = row.item_name.trim();
        if item_name.is_empty() {
            return Err(RecordError::MissingItem);
        }
        let completion_date = self
            .completion_date(&row.completion_date)
            .ok_or_else(|| RecordError::BadDate { raw: row.completion_date.clone() })?;

        let record = JobRecord {
            customer_name:        customer_name.to_string(),
            job_business_unit:    row.job_business_unit.trim().to_string(),
            completion_date,
            item_name:            item_name.to_string(),
            pool_amount:          self.pool_amount(&row.pool_tag).unwrap_or(0.0),
            primary_technician:   row.primary_technician.trim().to_string(),
            assigned_technicians: row.assigned_technicians.clone(),
        };
        if record.technician_names().is_empty() {
            return Err(RecordError::NoTechnicians);
        }
        Ok(record)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MalformedRow {
    /// Zero-based position in the source ledger.
    pub index:  usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Valid records in source order.
    pub records:   Vec<JobRecord>,
    pub malformed: Vec<MalformedRow>,
}

impl Ledger {
    pub fn from_rows(rows: &[LedgerRow], config: &PayrollConfig) -> PayrollResult<Self> {
        let parser = RowParser::new(config)?;
        let mut ledger = Ledger::default();
        for (index, row) in rows.iter().enumerate() {
            match parser.parse(row) {
                Ok(record) => ledger.records.push(record),
                Err(e) => {
                    log::warn!("ledger: row {index} skipped: {e}");
                    ledger.malformed.push(MalformedRow { index, reason: e.to_string() });
                }
            }
        }
        log::info!(
            "ledger: {} records, {} malformed rows",
            ledger.records.len(),
            ledger.malformed.len()
        );
        Ok(ledger)
    }

    pub fn from_records(records: Vec<JobRecord>) -> Self {
        Self { records, malformed: Vec::new() }
    }

    pub fn load(path: &Path, config: &PayrollConfig) -> PayrollResult<Self> {
        let unavailable = |reason: String| PayrollError::LedgerUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let file: LedgerFile = serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;
        Self::from_rows(&file.jobs, config)
    }
}
