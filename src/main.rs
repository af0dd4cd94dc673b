//! Quasar Docs MCP Server - Entry Point
//!
//! This is the main entry point for the quasar-docs-mcp server.
//! It sets up logging, parses arguments, and starts the server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use quasar_docs_mcp::config::DocsConfig;
use quasar_docs_mcp::docs::GithubFetcher;
use quasar_docs_mcp::docs::fetcher::Fetcher;
use quasar_docs_mcp::mcp::QuasarDocs;

/// MCP server for Quasar Framework documentation access.
#[derive(Parser, Debug)]
#[command(name = "quasar-docs-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Branch of the Quasar repository to read documentation from.
    #[arg(short, long, default_value = "dev")]
    branch: String,

    /// TTL in seconds for cached remote file and directory fetches.
    #[arg(long, default_value_t = 30 * 60)]
    file_ttl_secs: u64,

    /// TTL in seconds for the in-memory documentation index.
    #[arg(long, default_value_t = 60 * 60)]
    index_ttl_secs: u64,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Parses the log level string into a tracing Level.
    fn parse_log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!("invalid log level: {}", other),
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(level: Level) -> Result<()> {
    // Create an env filter that respects RUST_LOG but has a default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quasar_docs_mcp={level},reqwest={level}")));

    // Set up the subscriber
    // Note: We write logs to stderr to keep stdout clean for MCP communication
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

/// Main entry point.
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing
    let log_level = args.parse_log_level()?;
    init_tracing(log_level)?;

    let config = DocsConfig::from_env(
        args.branch.clone(),
        Duration::from_secs(args.file_ttl_secs),
        Duration::from_secs(args.index_ttl_secs),
    );

    info!(
        branch = %config.branch,
        token = config.github_token.is_some(),
        "starting quasar-docs-mcp server"
    );

    let fetcher: Arc<dyn Fetcher> =
        Arc::new(GithubFetcher::new(config.clone()).context("failed to create HTTP client")?);
    let server = QuasarDocs::new(fetcher, config.index_ttl);

    info!("starting MCP server with stdio transport");

    // Start the MCP server with stdio transport
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;

    info!("MCP server started, waiting for messages");

    // Wait for the service to complete (handles graceful shutdown)
    service.waiting().await?;

    info!("MCP server shut down gracefully");

    Ok(())
}
