use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Roster unavailable at {path}: {reason}")]
    RosterUnavailable { path: String, reason: String },

    #[error("Roster contains no technicians")]
    EmptyRoster,

    #[error("Ledger unavailable at {path}: {reason}")]
    LedgerUnavailable { path: String, reason: String },

    #[error("Run not initialized")]
    RunNotInitialized,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PayrollResult<T> = Result<T, PayrollError>;

/// A single ledger row that cannot be turned into a job record.
/// Never fatal: the row is logged, counted and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing customer name")]
    MissingCustomer,

    #[error("missing item name")]
    MissingItem,

    #[error("unparseable completion date '{raw}'")]
    BadDate { raw: String },

    #[error("no technicians listed")]
    NoTechnicians,
}
