//! docfuse-server - merge uploaded files into a single PDF over HTTP.

mod cli;
mod error;
mod routes;

use anyhow::Context;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::routes::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let addr = cli.addr()?;
    let state = AppState::new(cli.to_config(), cli.merge_timeout())
        .context("invalid merge configuration")?;
    let app = router(state, cli.max_upload_bytes());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        version = docfuse::VERSION,
        max_upload_mb = cli.max_upload_mb,
        merge_timeout_secs = cli.merge_timeout_secs,
        "{} listening",
        docfuse::NAME
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
