//! One-shot client that posts the sample documents to a running `searchd`.

use clap::Parser;
use codesearch::ingestion::client::{IndexClient, sample_documents};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "indexer", about = "Post sample documents to searchd")]
struct Args {
    /// searchd base url
    #[arg(long, env = "SEARCHD_URL", default_value = "http://localhost:8090")]
    searchd: String,

    /// repo name attached to every sample document
    #[arg(long, default_value = "example/repo")]
    repo: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let client = IndexClient::new(&args.searchd);
    let documents = sample_documents(&args.repo);

    tracing::info!(
        "Posting {} documents to {}/index",
        documents.len(),
        client.base_url()
    );
    let outcome = client.index(documents).await?;

    println!("status={} body={}", outcome.status, outcome.body.trim_end());
    Ok(())
}
