//! Runs `searchd` and `gateway` together until Ctrl-C.

use clap::Parser;
use codesearch::config::parse_listen_addr;
use codesearch::ingestion::client::IndexClient;
use codesearch::launcher::process::{Supervisor, default_specs};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "devserver", about = "Run the search stack locally")]
struct Args {
    #[arg(long, default_value = ":8090")]
    searchd_addr: String,

    #[arg(long, default_value = ":8080")]
    gateway_addr: String,

    /// Seconds to wait for searchd to answer /healthz
    #[arg(long, default_value_t = 60)]
    ready_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let searchd_port = parse_listen_addr(&args.searchd_addr)?.port();
    let searchd_url = format!("http://localhost:{}", searchd_port);

    let supervisor = Supervisor::start(default_specs(
        &args.searchd_addr,
        &args.gateway_addr,
        &searchd_url,
    ));
    if supervisor.is_empty() {
        anyhow::bail!("no service could be started");
    }
    tracing::info!("Starting devserver ({}) (ctrl-c to stop)", supervisor.names().join(", "));

    let readiness = tokio::spawn(wait_until_ready(
        IndexClient::new(&searchd_url),
        Duration::from_secs(args.ready_timeout),
    ));

    tokio::signal::ctrl_c().await?;
    readiness.abort();

    tracing::info!("Stopping services...");
    supervisor.shutdown().await;
    Ok(())
}

async fn wait_until_ready(client: IndexClient, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if client.healthy().await {
            tracing::info!("searchd is ready at {}", client.base_url());
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    tracing::warn!("searchd did not become ready within {:?}", timeout);
}
