use anyhow::Context;
use serde_json::{Value, json};
use tracing::debug;

use crate::resources::{Operation, Provider, ProviderContext};

#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct KfpCli {
    /// Resource type, e.g. `kubernetes_namespace` or `kubernetes_config_map`
    pub resource: String,
    /// Operation to run against the resource
    #[arg(value_enum)]
    pub operation: Operation,
    /// State record as JSON file or stdin if `-` is given. Example: `kfp kubernetes_namespace create -s ns.json`
    #[arg(short, long)]
    pub state: Option<clap_stdin::FileOrStdin>,
    /// Resource id; overrides the id in the state record (required for import)
    #[arg(long)]
    pub id: Option<String>,
    /// Print the resulting record on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Build the input record from the CLI arguments.
pub fn load_record(
    state: Option<String>,
    id: Option<String>,
) -> anyhow::Result<Value> {
    let mut record = match state {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).context("state record is not valid JSON")?
        }
        _ => json!({}),
    };
    if let Some(id) = id {
        record
            .as_object_mut()
            .context("state record must be a JSON object")?
            .insert("id".into(), Value::String(id));
    }
    Ok(record)
}

pub async fn run(cli: KfpCli) -> anyhow::Result<()> {
    let provider = Provider::new();
    // fail on typos before touching the cluster
    provider.resource(&cli.resource)?;

    let raw = cli.state.map(|s| s.contents()).transpose()?;
    let record = load_record(raw, cli.id)?;
    debug!(resource = %cli.resource, op = ?cli.operation, "executing");

    let ctx = ProviderContext::from_env().await?;
    let out = provider
        .execute(&ctx, &cli.resource, cli.operation, record)
        .await?;
    let rendered = if cli.compact {
        serde_json::to_string(&out)?
    } else {
        serde_json::to_string_pretty(&out)?
    };
    println!("{}", rendered);
    Ok(())
}
