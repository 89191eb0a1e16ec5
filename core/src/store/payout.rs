//! Store methods for payout rows and per-technician summaries.

use crate::{
    classifier::Role,
    error::PayrollResult,
    payout::{PayoutEntry, TechnicianPayouts},
    types::Money,
};
use chrono::NaiveDate;
use rusqlite::{params, types::Type, OptionalExtension};

use super::PayrollStore;

/// The total/count pair written next to a technician's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicianSummary {
    pub technician:  String,
    pub total:       Money,
    pub entry_count: i64,
}

fn role_from_column(idx: usize, raw: &str) -> rusqlite::Result<Role> {
    Role::parse(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown role '{raw}'").into(),
        )
    })
}

impl PayrollStore {
    pub fn insert_payout_entry(
        &self,
        run_id:     &str,
        technician: &str,
        row_index:  usize,
        e:          &PayoutEntry,
    ) -> PayrollResult<()> {
        self.conn.execute(
            "INSERT INTO payout_entry (
                run_id, technician, row_index, customer_name, job_business_unit,
                completion_date, item_name, total_pool_amount, technician_share,
                role, split_percentage, skill_class, team_details
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                run_id,
                technician,
                row_index as i64,
                &e.customer_name,
                &e.job_business_unit,
                e.completion_date.format("%Y-%m-%d").to_string(),
                &e.item_name,
                e.total_pool_amount,
                e.technician_share,
                e.role_for_job.as_str(),
                e.split_percentage,
                e.skill_class as i64,
                &e.team_details,
            ],
        )?;
        Ok(())
    }

    /// Swap a technician's rows and summary for the given ones in a
    /// single transaction. On error the previous rows stay in place.
    pub fn replace_technician_payouts(&self, run_id: &str, payouts: &TechnicianPayouts) -> PayrollResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.clear_technician(run_id, &payouts.technician)?;
        for (i, entry) in payouts.entries.iter().enumerate() {
            self.insert_payout_entry(run_id, &payouts.technician, i, entry)?;
        }
        self.upsert_technician_summary(run_id, &payouts.technician, payouts.total, payouts.entries.len())?;
        tx.commit()?;
        Ok(())
    }

    /// Rows for one technician in the order they were written.
    pub fn payout_entries_for(&self, run_id: &str, technician: &str) -> PayrollResult<Vec<PayoutEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_name, job_business_unit, completion_date, item_name,
                    total_pool_amount, technician_share, role, split_percentage,
                    skill_class, team_details
             FROM payout_entry
             WHERE run_id = ?1 AND technician = ?2
             ORDER BY row_index ASC",
        )?;
        let rows = stmt
            .query_map(params![run_id, technician], |row| {
                let date: String = row.get(2)?;
                let completion_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
                })?;
                let role = role_from_column(6, &row.get::<_, String>(6)?)?;
                Ok(PayoutEntry {
                    customer_name:     row.get(0)?,
                    job_business_unit: row.get(1)?,
                    completion_date,
                    item_name:         row.get(3)?,
                    total_pool_amount: row.get(4)?,
                    technician_share:  row.get(5)?,
                    role_for_job:      role,
                    split_percentage:  row.get(7)?,
                    skill_class:       row.get::<_, i64>(8)? as u8,
                    team_details:      row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn payout_entry_count(&self, run_id: &str) -> PayrollResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM payout_entry WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete a technician's rows and summary for this run.
    pub fn clear_technician(&self, run_id: &str, technician: &str) -> PayrollResult<()> {
        self.conn.execute(
            "DELETE FROM payout_entry WHERE run_id = ?1 AND technician = ?2",
            params![run_id, technician],
        )?;
        self.conn.execute(
            "DELETE FROM technician_summary WHERE run_id = ?1 AND technician = ?2",
            params![run_id, technician],
        )?;
        Ok(())
    }

    pub fn upsert_technician_summary(
        &self,
        run_id:      &str,
        technician:  &str,
        total:       Money,
        entry_count: usize,
    ) -> PayrollResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO technician_summary (run_id, technician, total, entry_count)
             VALUES (?1, ?2, ?3, ?4)",
            params![run_id, technician, total, entry_count as i64],
        )?;
        Ok(())
    }

    pub fn technician_summary(&self, run_id: &str, technician: &str) -> PayrollResult<Option<TechnicianSummary>> {
        let summary = self
            .conn
            .query_row(
                "SELECT technician, total, entry_count FROM technician_summary
                 WHERE run_id = ?1 AND technician = ?2",
                params![run_id, technician],
                |row| {
                    Ok(TechnicianSummary {
                        technician:  row.get(0)?,
                        total:       row.get(1)?,
                        entry_count: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(summary)
    }

    /// Sum of every technician's total for the run.
    pub fn run_total(&self, run_id: &str) -> PayrollResult<Money> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(total), 0.0) FROM technician_summary WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;

    #[test]
    fn unknown_role_in_a_row_is_a_read_error() {
        let store = PayrollStore::in_memory().unwrap();
        store.migrate().unwrap();
        store.insert_run("r", "test", "2024-05-01T00:00:00Z").unwrap();
        store
            .conn
            .execute(
                "INSERT INTO payout_entry (
                    run_id, technician, row_index, customer_name, job_business_unit,
                    completion_date, item_name, total_pool_amount, technician_share,
                    role, split_percentage, skill_class, team_details
                ) VALUES ('r', 'Bob', 0, 'Acme', 'HVAC', '2024-05-02', 'Tune-up',
                          100.0, 65.0, 'Supervisor', 65.0, 2, '')",
                [],
            )
            .unwrap();

        let err = store.payout_entries_for("r", "Bob").unwrap_err();
        assert!(matches!(
            err,
            PayrollError::Database(rusqlite::Error::FromSqlConversionFailure(6, Type::Text, _))
        ));
        assert!(err.to_string().contains("Supervisor"));
    }

    #[test]
    fn stored_roles_read_back() {
        for role in [Role::Lead, Role::Assistant, Role::Unassigned] {
            assert_eq!(role_from_column(6, role.as_str()).unwrap(), role);
        }
    }
}
