mod types;

pub use types::{MIN_DELETE_POLL_INTERVAL, NAMESPACE_TERMINATING, ProviderConfig};
