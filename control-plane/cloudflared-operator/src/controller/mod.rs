pub mod kinds;
pub mod reconcile;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use kube::{
    Client,
    api::Api,
    runtime::{
        Controller,
        controller::{self, Action},
        watcher::{self, Config},
    },
};
use tracing::{error, info, warn};

use crate::config::OperatorConfig;
use crate::crd::{CloudflaredDeployment, WorkloadKind};
use crate::templates::{DeriveError, WorkloadDefaults};

pub use reconcile::{Outcome, reconcile, reconcile_key};
pub use store::{KubeWorkloadStore, WorkloadStore};


#[derive(thiserror::Error, Debug)]
pub enum ReconcileErr {
    #[error("failed to get CloudflaredDeployment: {0}")]
    Fetch(#[source] kube::Error),
    #[error("failed to get {kind}: {source}")]
    Probe {
        kind: WorkloadKind,
        #[source]
        source: kube::Error,
    },
    #[error("failed to create {kind}: {source}")]
    Create {
        kind: WorkloadKind,
        #[source]
        source: kube::Error,
    },
    #[error(transparent)]
    Derive(#[from] DeriveError),
}

impl ReconcileErr {
    /// Remote-call failures are retried by the controller's error policy.
    /// A record that cannot be an owner is not; only a new event helps.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ReconcileErr::Derive(_))
    }
}

pub struct ControllerContext {
    pub store: Arc<dyn WorkloadStore>,
    pub defaults: WorkloadDefaults,
    pub error_requeue: Duration,
}

impl ControllerContext {
    pub fn new(store: Arc<dyn WorkloadStore>, cfg: &OperatorConfig) -> Self {
        Self {
            store,
            defaults: cfg.workload_defaults(),
            error_requeue: Duration::from_secs(cfg.error_requeue_secs),
        }
    }
}

pub async fn run_controller(
    client: Client,
    cfg: OperatorConfig,
) -> anyhow::Result<()> {
    let (records, daemonsets, deployments): (
        Api<CloudflaredDeployment>,
        Api<DaemonSet>,
        Api<Deployment>,
    ) = match cfg.watch_namespace.as_deref() {
        Some(ns) => (
            Api::namespaced(client.clone(), ns),
            Api::namespaced(client.clone(), ns),
            Api::namespaced(client.clone(), ns),
        ),
        None => (
            Api::all(client.clone()),
            Api::all(client.clone()),
            Api::all(client.clone()),
        ),
    };
    let ctx = Arc::new(ControllerContext::new(
        Arc::new(KubeWorkloadStore::new(client)),
        &cfg,
    ));
    info!(
        namespace = cfg.watch_namespace.as_deref().unwrap_or("*"),
        "controller: starting"
    );

    Controller::new(records, Config::default())
        .owns(daemonsets, Config::default())
        .owns(deployments, Config::default())
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj_ref, action)) => {
                    info!(object = %obj_ref, "reconciled: requeue={:?}", action)
                }
                Err(e) if already_reported(&e) => {}
                Err(e) => error!(error = ?e, "controller error"),
            }
        })
        .await;

    info!("controller: stopped");
    Ok(())
}

pub fn error_policy(
    _obj: Arc<CloudflaredDeployment>,
    error: &ReconcileErr,
    ctx: Arc<ControllerContext>,
) -> Action {
    if error.is_retryable() {
        warn!(%error, delay = ?ctx.error_requeue, "reconcile failed; requeueing");
        Action::requeue(ctx.error_requeue)
    } else {
        warn!(%error, "reconcile failed; waiting for a change");
        Action::await_change()
    }
}

/// Reconciler failures are logged by `error_policy`; the stream sink only
/// reports what never reached it.
pub(crate) fn already_reported(
    err: &controller::Error<ReconcileErr, watcher::Error>,
) -> bool {
    matches!(err, controller::Error::ReconcilerFailed(..))
}
