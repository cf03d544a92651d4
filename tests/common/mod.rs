//! Shared utilities for integration tests.

use axum::Router;
use reserve_proxy::config::{CaptureConfig, ProxyConfig};
use reserve_proxy::HttpServer;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;

/// Serve an Axum app as a mock upstream on an ephemeral port.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start the proxy on an ephemeral port. Capture is enabled when a
/// directory is given.
pub async fn spawn_proxy(
    mappings: HashMap<String, String>,
    capture_dir: Option<&Path>,
) -> SocketAddr {
    let config = ProxyConfig {
        mappings,
        listen: "127.0.0.1:0".to_string(),
        capture: match capture_dir {
            Some(dir) => CaptureConfig {
                enabled: true,
                dir: dir.to_str().unwrap().to_string(),
            },
            None => CaptureConfig::default(),
        },
    };

    let listener = TcpListener::bind(&config.listen).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    addr
}

/// Build a mapping table from (service, upstream address) pairs.
pub fn mappings(entries: &[(&str, SocketAddr)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(name, addr)| (name.to_string(), format!("http://{addr}")))
        .collect()
}
