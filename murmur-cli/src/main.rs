use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use murmur::server::{CoordinatorHandle, OverflowPolicy, ServerConfig, router};
use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "Anonymous pairing and room coordinator for live chat")]
struct Cli {
    #[arg(long, env = "MURMUR_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "MURMUR_PORT", default_value_t = 3000)]
    port: u16,

    /// Frames buffered per connection before the overflow policy kicks in.
    #[arg(long, env = "MURMUR_OUTBOUND_BUFFER", default_value_t = 256)]
    outbound_buffer: usize,

    #[arg(long, env = "MURMUR_COMMAND_BUFFER", default_value_t = 1024)]
    command_buffer: usize,

    /// `drop` discards frames for slow peers, `disconnect` closes them.
    #[arg(long, env = "MURMUR_OVERFLOW", default_value = "disconnect")]
    overflow: OverflowPolicy,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log).context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig {
        outbound_buffer: cli.outbound_buffer,
        command_buffer: cli.command_buffer,
        overflow_policy: cli.overflow,
    };

    let coordinator = CoordinatorHandle::spawn(config);
    let app = router(coordinator);

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!(
        "{} {}",
        "murmur".green().bold(),
        format!("listening on ws://{}/ws", addr).cyan()
    );
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
