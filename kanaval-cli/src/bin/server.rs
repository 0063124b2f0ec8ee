use anyhow::{Context, Result};
use clap::Parser;
use kanaval_cli::{init_tracing, server, settings::Settings};
use std::path::PathBuf;

/// Name-kana validation server
#[derive(Parser, Debug)]
#[command(name = "kanaval-server")]
#[command(about = "HTTP service validating and normalizing katakana form input", long_about = None)]
struct Args {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings = Settings::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(host) = args.host {
        settings.server.host = host;
    }

    tracing::info!(
        "Default options: allow_half_width={}, auto_normalize={}",
        settings.validation.allow_half_width,
        settings.validation.auto_normalize
    );

    let app = server::router(&settings);

    let bind_addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
