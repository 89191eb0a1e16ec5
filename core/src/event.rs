//! Run event log.
//!
//! Every decision the batch runner makes is recorded as an event so a
//! run can be audited after the fact. Variants are only ever appended.

use crate::{
    classifier::Role,
    payout::SkipReason,
    types::{DedupKey, Money, RunId, TechName},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayrollEvent {
    RunStarted {
        run_id:      RunId,
        technicians: usize,
        jobs:        usize,
    },
    LedgerRowRejected {
        index:  usize,
        reason: String,
    },
    JobSkipped {
        technician: TechName,
        dedup_key:  DedupKey,
        reason:     SkipReason,
    },
    PayoutAllocated {
        technician:    TechName,
        dedup_key:     DedupKey,
        role:          Role,
        split_percent: f64,
        share:         Money,
    },
    TechnicianCompleted {
        technician: TechName,
        entries:    usize,
        total:      Money,
    },
    RunCompleted {
        run_id:      RunId,
        rows:        usize,
        total_paid:  Money,
    },
}

impl PayrollEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            PayrollEvent::RunStarted { .. }          => "run_started",
            PayrollEvent::LedgerRowRejected { .. }   => "ledger_row_rejected",
            PayrollEvent::JobSkipped { .. }          => "job_skipped",
            PayrollEvent::PayoutAllocated { .. }     => "payout_allocated",
            PayrollEvent::TechnicianCompleted { .. } => "technician_completed",
            PayrollEvent::RunCompleted { .. }        => "run_completed",
        }
    }
}

/// A persisted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub run_id:     RunId,
    pub seq:        u64,
    pub technician: Option<TechName>,
    pub event_type: String,
    pub payload:    String,
}
