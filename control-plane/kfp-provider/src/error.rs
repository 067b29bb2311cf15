use kfp_wait::{ClientError, WaitError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error("invalid resource id {0:?}, expected <namespace>/<name>")]
    InvalidId(String),

    #[error("resource has no id; create or import it first")]
    MissingId,

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("state record error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] envconfig::Error),

    #[error("kubernetes client setup failed: {0}")]
    Kube(#[from] kube::Error),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Client(e) if e.is_not_found())
    }
}
