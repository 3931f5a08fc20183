use std::net::SocketAddr;

use kube::Client;
use tokio::task::JoinHandle;

use crate::{config::OperatorConfig, controller::run_controller, web::run_probe_server};

/// Compute the probe server bind address based on config.
pub fn compute_http_addr(cfg: &OperatorConfig) -> SocketAddr {
    ([0, 0, 0, 0], cfg.http_port).into()
}

/// Spawn the Kubernetes controller loop.
pub fn spawn_controller(
    client: Client,
    cfg: OperatorConfig,
) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move { run_controller(client, cfg).await })
}

pub fn spawn_probe_server(addr: SocketAddr) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move { run_probe_server(addr).await })
}

/// Run the controller and the probe server until either one finishes.
pub async fn run_all(client: Client, cfg: OperatorConfig) -> anyhow::Result<()> {
    let addr = compute_http_addr(&cfg);
    let controller = spawn_controller(client, cfg);
    let probes = spawn_probe_server(addr);

    tokio::select! {
        res = controller => res?,
        res = probes => res?,
    }
}
