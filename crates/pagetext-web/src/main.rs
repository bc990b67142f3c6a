//! Web server: upload a PDF, read its text and statistics, download the results.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagetext_core::models::config::PagetextConfig;

mod error;
mod handlers;
mod router;
mod state;
mod template;
mod upload;

use state::AppState;

/// PDF text extractor web interface
#[derive(Parser)]
#[command(name = "pagetext-web")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = PagetextConfig::load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", config.server.bind, e))?;

    tracing::info!(
        engine = %config.pdf.engine,
        max_upload_mb = config.server.max_upload_mb,
        max_documents = config.server.max_documents,
        "Starting pagetext-web"
    );

    let app = router::build_router(Arc::new(AppState::new(config)));

    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
