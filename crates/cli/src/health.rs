//! Health endpoint
//!
//! `GET /health`, `/healthz`, `/ready` and `/readyz` answer 200 while the
//! process runs; `GET /image` returns the `IMAGE` environment variable.

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(healthy))
        .route("/healthz", get(healthy))
        .route("/ready", get(healthy))
        .route("/readyz", get(healthy))
        .route("/image", get(image))
}

async fn healthy() -> &'static str {
    "OK"
}

async fn image() -> String {
    std::env::var("IMAGE").unwrap_or_default()
}

/// Serve on all interfaces until `shutdown` fires
pub async fn serve(port: u16, shutdown: oneshot::Receiver<()>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("health endpoint ready: {}", addr);
    serve_on(listener, shutdown).await
}

async fn serve_on(listener: TcpListener, shutdown: oneshot::Receiver<()>) -> std::io::Result<()> {
    axum::serve(listener, router())
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await?;
    info!("health endpoint shutdown");
    Ok(())
}
