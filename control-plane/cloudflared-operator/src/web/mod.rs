use axum::{Router, routing::get};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Liveness/readiness probes for the operator pod.
pub fn probe_router() -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/readyz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_probe_server(addr: SocketAddr) -> anyhow::Result<()> {
    let app = probe_router();
    info!("probe server listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
