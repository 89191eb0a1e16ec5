//! Batch runner: every rostered technician against one ledger.
//!
//! ORDER (fixed):
//!   1. RunStarted, then one LedgerRowRejected per malformed row.
//!   2. Technicians in roster order; for each, skips worth auditing,
//!      one PayoutAllocated per row, the sink write, TechnicianCompleted.
//!   3. RunCompleted.
//!
//! RULES:
//!   - The roster is read-only for the whole run.
//!   - Per-job problems are recovered locally; only missing inputs abort.
//!   - No state survives between runs except what the sink keeps.

use crate::{
    context::RunContext,
    error::{PayrollError, PayrollResult},
    event::PayrollEvent,
    ledger::Ledger,
    payout::{PayoutCalculator, SkipReason, TechnicianPayouts},
    roster::Roster,
    sink::PayoutSink,
    types::{round_cents, Money},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SkipCounts {
    pub no_pool:     usize,
    pub not_on_job:  usize,
    pub duplicate:   usize,
    pub ineligible:  usize,
    pub zero_payout: usize,
}

impl SkipCounts {
    pub fn add(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoPool     => self.no_pool += 1,
            SkipReason::NotOnJob   => self.not_on_job += 1,
            SkipReason::Duplicate  => self.duplicate += 1,
            SkipReason::Ineligible => self.ineligible += 1,
            SkipReason::ZeroPayout => self.zero_payout += 1,
        }
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::NoPool     => self.no_pool,
            SkipReason::NotOnJob   => self.not_on_job,
            SkipReason::Duplicate  => self.duplicate,
            SkipReason::Ineligible => self.ineligible,
            SkipReason::ZeroPayout => self.zero_payout,
        }
    }
}

/// What the caller reports back after a batch.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BatchSummary {
    pub run_id:              String,
    pub technicians_visited: usize,
    pub technicians_paid:    usize,
    pub rows_emitted:        usize,
    pub total_paid:          Money,
    pub ledger_records:      usize,
    pub malformed_rows:      usize,
    /// Summed over technicians: a job skipped for three people counts three times.
    pub skipped:             SkipCounts,
}

pub struct BatchRunner<'a> {
    ctx:    &'a RunContext,
    roster: &'a Roster,
    seq:    u64,
}

impl<'a> BatchRunner<'a> {
    pub fn new(ctx: &'a RunContext, roster: &'a Roster) -> Self {
        Self { ctx, roster, seq: 0 }
    }

    fn emit<S: PayoutSink + ?Sized>(
        &mut self,
        sink: &mut S,
        technician: Option<&str>,
        event: PayrollEvent,
    ) -> PayrollResult<()> {
        self.seq += 1;
        sink.record_event(&self.ctx.run_id, self.seq, technician, &event)
    }

    /// Run every technician the batch covers.
    pub fn run<S: PayoutSink + ?Sized>(&mut self, ledger: &Ledger, sink: &mut S) -> PayrollResult<BatchSummary> {
        if self.roster.is_empty() {
            return Err(PayrollError::EmptyRoster);
        }
        let include_ineligible = self.ctx.config.batch_include_ineligible;
        let technicians: Vec<String> = self
            .roster
            .profiles()
            .iter()
            .filter(|p| include_ineligible || p.eligible)
            .map(|p| p.name.clone())
            .collect();

        self.start(ledger, sink, technicians.len())?;

        let mut summary = BatchSummary {
            run_id:         self.ctx.run_id.clone(),
            ledger_records: ledger.records.len(),
            malformed_rows: ledger.malformed.len(),
            ..BatchSummary::default()
        };

        for technician in &technicians {
            let payouts = self.process(technician, ledger, sink)?;
            summary.technicians_visited += 1;
            if !payouts.entries.is_empty() {
                summary.technicians_paid += 1;
            }
            summary.rows_emitted += payouts.entries.len();
            summary.total_paid += payouts.total;
            for s in &payouts.skipped {
                summary.skipped.add(s.reason);
            }
        }
        summary.total_paid = round_cents(summary.total_paid);

        self.emit(sink, None, PayrollEvent::RunCompleted {
            run_id:     self.ctx.run_id.clone(),
            rows:       summary.rows_emitted,
            total_paid: summary.total_paid,
        })?;
        log::info!(
            "run={}: {} technicians, {} paid, {} rows, ${:.2} total, {} malformed rows",
            self.ctx.run_id,
            summary.technicians_visited,
            summary.technicians_paid,
            summary.rows_emitted,
            summary.total_paid,
            summary.malformed_rows
        );
        Ok(summary)
    }

    /// Process a single technician as a run of its own. The name need
    /// not be on the roster; an unknown name simply earns nothing.
    pub fn run_one<S: PayoutSink + ?Sized>(
        &mut self,
        technician: &str,
        ledger: &Ledger,
        sink: &mut S,
    ) -> PayrollResult<TechnicianPayouts> {
        if self.roster.is_empty() {
            return Err(PayrollError::EmptyRoster);
        }
        self.start(ledger, sink, 1)?;
        let payouts = self.process(technician, ledger, sink)?;
        self.emit(sink, None, PayrollEvent::RunCompleted {
            run_id:     self.ctx.run_id.clone(),
            rows:       payouts.entries.len(),
            total_paid: payouts.total,
        })?;
        Ok(payouts)
    }

    fn start<S: PayoutSink + ?Sized>(&mut self, ledger: &Ledger, sink: &mut S, technicians: usize) -> PayrollResult<()> {
        sink.begin_run(self.ctx)?;
        self.seq = self.seq.max(sink.last_seq(&self.ctx.run_id)?);
        self.emit(sink, None, PayrollEvent::RunStarted {
            run_id: self.ctx.run_id.clone(),
            technicians,
            jobs: ledger.records.len(),
        })?;
        for row in &ledger.malformed {
            self.emit(sink, None, PayrollEvent::LedgerRowRejected {
                index:  row.index,
                reason: row.reason.clone(),
            })?;
        }
        Ok(())
    }

    fn process<S: PayoutSink + ?Sized>(
        &mut self,
        technician: &str,
        ledger: &Ledger,
        sink: &mut S,
    ) -> PayrollResult<TechnicianPayouts> {
        let calculator = PayoutCalculator::new(self.roster);
        let payouts = calculator.payouts_for(self.ctx, technician, &ledger.records);
        let tech = Some(payouts.technician.as_str());

        // NoPool and NotOnJob fire for nearly every job; they stay in the counts only.
        for s in &payouts.skipped {
            if matches!(s.reason, SkipReason::NoPool | SkipReason::NotOnJob) {
                continue;
            }
            self.emit(sink, tech, PayrollEvent::JobSkipped {
                technician: payouts.technician.clone(),
                dedup_key:  s.dedup_key.clone(),
                reason:     s.reason,
            })?;
        }
        for entry in &payouts.entries {
            self.emit(sink, tech, PayrollEvent::PayoutAllocated {
                technician:    payouts.technician.clone(),
                dedup_key:     entry.dedup_key(),
                role:          entry.role_for_job,
                split_percent: entry.split_percentage,
                share:         entry.technician_share,
            })?;
        }

        sink.write_technician(&self.ctx.run_id, &payouts)?;

        self.emit(sink, tech, PayrollEvent::TechnicianCompleted {
            technician: payouts.technician.clone(),
            entries:    payouts.entries.len(),
            total:      payouts.total,
        })?;
        Ok(payouts)
    }
}
