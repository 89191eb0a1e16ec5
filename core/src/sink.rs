//! Output sinks. The calculator only hands over an ordered list of
//! payout rows plus a total; what happens to them is the sink's business.

use crate::{
    context::RunContext,
    error::{PayrollError, PayrollResult},
    event::{EventLogEntry, PayrollEvent},
    payout::TechnicianPayouts,
    roster::name_key,
    store::PayrollStore,
};

pub trait PayoutSink {
    /// Called once before any technician is written.
    fn begin_run(&mut self, _ctx: &RunContext) -> PayrollResult<()> {
        Ok(())
    }

    /// Highest event sequence already recorded for the run, 0 if none.
    /// A runner continues numbering after it, so rerunning a run id
    /// appends events instead of reusing old sequence numbers.
    fn last_seq(&self, _run_id: &str) -> PayrollResult<u64> {
        Ok(0)
    }

    fn record_event(
        &mut self,
        _run_id: &str,
        _seq: u64,
        _technician: Option<&str>,
        _event: &PayrollEvent,
    ) -> PayrollResult<()> {
        Ok(())
    }

    /// Replaces whatever was written for this technician in the run.
    fn write_technician(&mut self, run_id: &str, payouts: &TechnicianPayouts) -> PayrollResult<()>;
}

/// Keeps everything in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub technicians: Vec<TechnicianPayouts>,
    pub events:      Vec<PayrollEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payouts_for(&self, technician: &str) -> Option<&TechnicianPayouts> {
        let key = name_key(technician);
        self.technicians.iter().find(|t| name_key(&t.technician) == key)
    }
}

impl PayoutSink for MemorySink {
    fn record_event(
        &mut self,
        _run_id: &str,
        _seq: u64,
        _technician: Option<&str>,
        event: &PayrollEvent,
    ) -> PayrollResult<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn write_technician(&mut self, _run_id: &str, payouts: &TechnicianPayouts) -> PayrollResult<()> {
        self.technicians.push(payouts.clone());
        Ok(())
    }
}

impl PayoutSink for PayrollStore {
    fn begin_run(&mut self, ctx: &RunContext) -> PayrollResult<()> {
        if !self.run_exists(&ctx.run_id)? {
            self.insert_run(&ctx.run_id, env!("CARGO_PKG_VERSION"), &ctx.started_at.to_rfc3339())?;
        }
        Ok(())
    }

    fn last_seq(&self, run_id: &str) -> PayrollResult<u64> {
        self.max_event_seq(run_id)
    }

    fn record_event(
        &mut self,
        run_id: &str,
        seq: u64,
        technician: Option<&str>,
        event: &PayrollEvent,
    ) -> PayrollResult<()> {
        let entry = EventLogEntry {
            id:         None,
            run_id:     run_id.to_string(),
            seq,
            technician: technician.map(str::to_string),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.append_event(&entry)
    }

    fn write_technician(&mut self, run_id: &str, payouts: &TechnicianPayouts) -> PayrollResult<()> {
        if !self.run_exists(run_id)? {
            return Err(PayrollError::RunNotInitialized);
        }
        self.replace_technician_payouts(run_id, payouts)
    }
}
