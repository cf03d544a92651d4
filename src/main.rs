//! Path-prefix routing reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 RESERVE PROXY                 │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ routing  │──▶│  forward  │──┼──▶ Upstream
//!                    │  │ server  │   │ resolver │   │ dispatch  │  │
//!                    │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                    │                                      │        │
//!                    │                                      ▼        │
//!   Client Response  │                               ┌───────────┐  │
//!   ◀────────────────┼───────────────────────────────│  capture  │  │
//!                    │                               │ (optional)│  │
//!                    │                               └───────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The first path segment of each request selects an upstream from a
//! static mapping loaded at startup; the segment is stripped and the
//! request forwarded with the Host header rewritten. With capture
//! enabled, each upstream response is also persisted as a JSON
//! artifact before being delivered to the client.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reserve_proxy::config::load_config;
use reserve_proxy::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "reserve-proxy", version, about = "Path-prefix routing reverse proxy")]
struct Args {
    /// Path to the JSON config file.
    #[arg(long, default_value = "reserve-config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reserve_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(config = %args.config.display(), error = %err, "Failed to load config");
            std::process::exit(1);
        }
    };

    println!("Loaded proxy mappings:");
    for (service, target) in &config.mappings {
        println!("  /{service} -> {target}");
    }
    if config.capture.enabled {
        println!(
            "Responses will be saved to the '{}' directory",
            config.capture.dir
        );
    }

    let listener = TcpListener::bind(&config.listen).await?;
    println!("Starting proxy server on {}", listener.local_addr()?);

    let server = HttpServer::new(config);
    server.run(listener).await?;

    Ok(())
}
