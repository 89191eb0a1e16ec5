//! Per-invocation run context. Passed down the call chain instead of
//! any process-wide "batch running" flag.

use crate::{config::PayrollConfig, types::RunId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id:     RunId,
    pub started_at: DateTime<Utc>,
    pub config:     PayrollConfig,
}

impl RunContext {
    /// Fresh context with a random v4 run id.
    pub fn new(config: PayrollConfig) -> Self {
        Self::with_run_id(format!("run-{}", uuid::Uuid::new_v4()), config)
    }

    pub fn with_run_id(run_id: impl Into<RunId>, config: PayrollConfig) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Utc::now(),
            config,
        }
    }

    /// Context with a fixed id and test config.
    pub fn for_test(run_id: &str) -> Self {
        Self::with_run_id(run_id, PayrollConfig::default_test())
    }
}
