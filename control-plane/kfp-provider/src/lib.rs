pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod schema;
pub mod state;

pub use error::ProviderError;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global subscriber, filtered by `KFP_LOG`. Logs go to stderr so
/// stdout stays free for the state record.
pub fn init_tracing(default_level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("KFP_LOG")
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
