use serde::{Deserialize, Serialize};

use crate::ProviderError;

/// Persisted record of one managed resource: the handle the host framework
/// tracks plus the resource's attributes.
///
/// An absent id means the resource does not exist (never created, deleted,
/// or found missing on read).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ResourceState<A> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub attributes: A,
}

impl<A> ResourceState<A> {
    pub fn new(attributes: A) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn require_id(&self) -> Result<&str, ProviderError> {
        self.id().filter(|id| !id.is_empty()).ok_or(ProviderError::MissingId)
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn is_gone(&self) -> bool {
        self.id().is_none()
    }
}

impl<A: Default> ResourceState<A> {
    /// Passthrough import: only the id is known until the next read.
    pub fn imported(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            attributes: A::default(),
        }
    }
}
