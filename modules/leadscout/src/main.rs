use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apify_client::ApifyClient;
use leadscout_common::{config::apify_token_from_env, RunConfig};
use leadscout::apify::{ApifyDiscovery, ApifyEnrichment};
use leadscout::sinks::{ApifyDatasetSink, JsonlSink};
use leadscout::LeadScout;

/// Hashtag lead discovery: find accounts posting about the configured
/// topics, validate audience size and topical relevance, emit the leads.
#[derive(Parser, Debug)]
#[command(name = "leadscout")]
struct Args {
    /// Path to the JSON run configuration
    #[arg(long, default_value = "input.json")]
    input: PathBuf,

    /// Local JSONL file accepted records are appended to
    #[arg(long, default_value = "leads.jsonl")]
    output: PathBuf,

    /// Append records to this Apify dataset instead of the local file
    #[arg(long)]
    dataset: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leadscout=info".parse()?))
        .init();

    let args = Args::parse();

    info!("LeadScout starting...");

    let config = RunConfig::load(&args.input)?;
    config.log_redacted();

    let client = Arc::new(ApifyClient::new(apify_token_from_env()));
    let discovery = ApifyDiscovery::new(client.clone(), &config);
    let enrichment = ApifyEnrichment::new(client.clone(), &config);
    let scout = LeadScout::new(discovery, enrichment, config);

    let stats = match args.dataset {
        Some(dataset_id) => {
            let sink = ApifyDatasetSink::new(client, dataset_id);
            scout.run(sink).await?
        }
        None => {
            let sink = JsonlSink::create(&args.output)?;
            scout.run(sink).await?
        }
    };

    info!(%stats, "Done");
    Ok(())
}
