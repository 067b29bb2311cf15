use std::time::Duration;

use crate::ClientError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitError {
    #[error("delete of {id} failed: {source}")]
    DeleteFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("status check of {id} failed: {source}")]
    GetFailed {
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("{id} reported unexpected phase {phase:?}")]
    UnexpectedPhase { id: String, phase: String },

    #[error(
        "timeout after {timeout:?} waiting for {id} to be deleted (last phase: {})",
        .last_phase.as_deref().unwrap_or("unknown")
    )]
    Timeout {
        id: String,
        timeout: Duration,
        last_phase: Option<String>,
    },
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}
