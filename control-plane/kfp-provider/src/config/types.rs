use std::time::Duration;

use envconfig::Envconfig;
use kfp_wait::WaitSpec;

/// Phase a Namespace reports while its contents are being torn down.
pub const NAMESPACE_TERMINATING: &str = "Terminating";

pub const MIN_DELETE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Envconfig, Clone, Debug)]
pub struct ProviderConfig {
    /// Namespace used for namespaced kinds when the record does not set one.
    /// Env: KFP_DEFAULT_NAMESPACE
    #[envconfig(from = "KFP_DEFAULT_NAMESPACE", default = "default")]
    pub default_namespace: String,

    /// Upper bound for waiting on a deleted Namespace to disappear.
    /// Env: KFP_NAMESPACE_DELETE_TIMEOUT_SECS
    #[envconfig(from = "KFP_NAMESPACE_DELETE_TIMEOUT_SECS", default = "300")]
    pub namespace_delete_timeout_secs: u64,

    /// Env: KFP_DELETE_POLL_INTERVAL_MS
    #[envconfig(from = "KFP_DELETE_POLL_INTERVAL_MS", default = "2000")]
    pub delete_poll_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default_namespace: "default".into(),
            namespace_delete_timeout_secs: 300,
            delete_poll_interval_ms: 2000,
        }
    }
}

impl ProviderConfig {
    pub fn namespace_delete_timeout(&self) -> Duration {
        Duration::from_secs(self.namespace_delete_timeout_secs)
    }

    /// Clamped to at least [`MIN_DELETE_POLL_INTERVAL`].
    pub fn delete_poll_interval(&self) -> Duration {
        Duration::from_millis(self.delete_poll_interval_ms)
            .max(MIN_DELETE_POLL_INTERVAL)
    }

    /// Namespaces only count as deleted once they are gone; `Terminating` is
    /// the only phase worth waiting through.
    pub fn namespace_wait_spec(&self) -> WaitSpec {
        WaitSpec::with_timeout(self.namespace_delete_timeout())
            .pending([NAMESPACE_TERMINATING])
            .poll_every(self.delete_poll_interval())
    }
}
