use clap::Parser;
use kfp_provider::{cli::KfpCli, init_tracing};
use tracing::level_filters::LevelFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing(LevelFilter::WARN);
    let cli = KfpCli::parse();
    kfp_provider::cli::run(cli).await
}
