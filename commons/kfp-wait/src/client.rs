use async_trait::async_trait;

/// Error returned by a [`ResourceClient`], classified so callers never need
/// to inspect the underlying client library's error type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("api error ({code} {reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Minimal view of a remote API needed to delete a resource and watch it go.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    type Resource: Send;

    async fn get(&self, id: &str) -> Result<Self::Resource, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;

    /// Lifecycle label reported by the remote system, e.g. `Terminating`.
    fn phase(&self, resource: &Self::Resource) -> String;
}
