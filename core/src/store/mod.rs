//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The batch runner and sinks call store methods and never execute SQL directly.

use crate::{error::PayrollResult, event::EventLogEntry};
mod payout;
use rusqlite::{params, Connection, OptionalExtension};

pub use payout::TechnicianSummary;

pub struct PayrollStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl PayrollStore {
    pub fn open(path: &str) -> PayrollResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PayrollResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PayrollResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_payouts.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, version: &str, started_at: &str) -> PayrollResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, version, started_at) VALUES (?1, ?2, ?3)",
            params![run_id, version, started_at],
        )?;
        Ok(())
    }

    pub fn run_exists(&self, run_id: &str) -> PayrollResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT run_id FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> PayrollResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, seq, technician, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.seq as i64,
                entry.technician,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_run(&self, run_id: &str) -> PayrollResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, seq, technician, event_type, payload
             FROM event_log WHERE run_id = ?1
             ORDER BY seq ASC, id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    run_id:     row.get(1)?,
                    seq:        row.get::<_, i64>(2)? as u64,
                    technician: row.get(3)?,
                    event_type: row.get(4)?,
                    payload:    row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn max_event_seq(&self, run_id: &str) -> PayrollResult<u64> {
        let seq: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(seq), 0) FROM event_log WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(seq as u64)
    }

    pub fn event_count(&self, run_id: &str, event_type: &str) -> PayrollResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE run_id = ?1 AND event_type = ?2",
            params![run_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
