//! Command-line and environment configuration for the server.
//!
//! Every option can also be set through an environment variable, which is
//! how container deployments usually configure it.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use docfuse::{MergeConfig, UnrecognizedPolicy};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Merge uploaded PDFs, images, text and office documents into one PDF.
///
/// docfuse-server exposes a single multipart endpoint. Files are converted
/// to pages in upload order and returned as one downloadable document.
#[derive(Parser, Debug)]
#[command(name = "docfuse-server")]
#[command(version)]
#[command(about = "HTTP server that merges uploaded files into a single PDF", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Address to bind to
    ///
    /// Use 127.0.0.1 to accept local connections only.
    #[arg(long, env = "DOCFUSE_HOST", default_value = "0.0.0.0", value_name = "ADDR")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest accepted request body, in megabytes
    ///
    /// Applies to the whole multipart body, all files included.
    /// Larger uploads are rejected before any conversion starts.
    #[arg(long, env = "DOCFUSE_MAX_UPLOAD_MB", default_value_t = 200, value_name = "MB")]
    pub max_upload_mb: usize,

    /// Longest a single merge may run, in seconds
    ///
    /// A merge that exceeds this limit fails with a server error and
    /// no partial document is returned.
    #[arg(long, env = "DOCFUSE_MERGE_TIMEOUT_SECS", default_value_t = 300, value_name = "SECS")]
    pub merge_timeout_secs: u64,

    /// Default log filter
    ///
    /// Overridden by RUST_LOG when that is set.
    /// Examples: info, debug, docfuse=debug,tower=warn
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    /// What to do with uploads whose type is not recognized
    ///
    /// - skip: drop the file and log a warning (default)
    /// - error-page: keep its position with a notice page
    #[arg(long, default_value = "skip", value_name = "POLICY")]
    pub unrecognized: UnrecognizedPolicy,
}

impl Cli {
    /// Socket address to listen on.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {addr}: {e}"))
    }

    /// Request body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Per-merge time limit.
    pub fn merge_timeout(&self) -> Duration {
        Duration::from_secs(self.merge_timeout_secs)
    }

    /// Base merge configuration; the quality tier is chosen per request.
    pub fn to_config(&self) -> MergeConfig {
        MergeConfig::default().with_unrecognized(self.unrecognized)
    }
}
