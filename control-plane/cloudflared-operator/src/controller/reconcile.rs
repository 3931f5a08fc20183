use std::sync::Arc;

use kube::ResourceExt;
use kube::runtime::controller::Action;
use tracing::{debug, info, instrument, warn};

use super::kinds::descriptor_for;
use super::store::is_already_exists;
use super::{ControllerContext, ReconcileErr};
use crate::crd::{CloudflaredDeployment, KindResolution, WorkloadKind};
use crate::templates::{derive_parts, owner_ref};

/// Terminal result of one successful reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The record vanished between the event and this pass.
    RecordGone,
    /// The record is being deleted; its workload is left to the garbage collector.
    Deleting,
    /// `spec.kind` names neither workload kind. Nothing is done.
    InvalidKind(String),
    UpToDate(WorkloadKind),
    Created(WorkloadKind),
}

/// Adapter for `kube::runtime::Controller`. The cached object only supplies the
/// key; the pass itself re-reads the record.
pub async fn reconcile(
    obj: Arc<CloudflaredDeployment>,
    ctx: Arc<ControllerContext>,
) -> Result<Action, ReconcileErr> {
    let ns = obj.namespace().unwrap_or_else(|| "default".to_string());
    let name = obj.name_any();
    let outcome = reconcile_key(&ctx, &ns, &name).await?;
    debug!(%ns, %name, ?outcome, "reconcile: pass finished");
    Ok(Action::await_change())
}

/// Drive the workload for `ns/name` towards its CloudflaredDeployment.
///
/// Performs at most one write: the create of a missing workload. An existing
/// workload of the resolved kind is never touched.
#[instrument(skip_all, fields(ns = %ns, name = %name))]
pub async fn reconcile_key(
    ctx: &ControllerContext,
    ns: &str,
    name: &str,
) -> Result<Outcome, ReconcileErr> {
    let Some(cd) = ctx
        .store
        .get_record(ns, name)
        .await
        .map_err(ReconcileErr::Fetch)?
    else {
        debug!("reconcile: record not found; nothing to do");
        return Ok(Outcome::RecordGone);
    };

    if cd.metadata.deletion_timestamp.is_some() {
        debug!("reconcile: deletion in progress; skipping");
        return Ok(Outcome::Deleting);
    }

    let kind = match cd.spec.resolved_kind() {
        KindResolution::Resolved(kind) => kind,
        KindResolution::Invalid(raw) => {
            info!(kind = %raw, "reconcile: invalid CloudflaredDeployment kind");
            return Ok(Outcome::InvalidKind(raw));
        }
    };

    let exists = ctx
        .store
        .workload_exists(kind, ns, name)
        .await
        .map_err(|source| ReconcileErr::Probe { kind, source })?;
    if exists {
        info!(%kind, "reconcile: up to date");
        return Ok(Outcome::UpToDate(kind));
    }

    let owner = owner_ref(&cd)?;
    let parts = derive_parts(&cd, &ctx.defaults).with_owner(owner);
    let workload = (descriptor_for(kind).build)(parts);

    match ctx.store.create_workload(&workload).await {
        Ok(()) => {
            info!(%kind, "reconcile: created workload");
            Ok(Outcome::Created(kind))
        }
        Err(e) if is_already_exists(&e) => {
            warn!(%kind, "reconcile: workload appeared concurrently; treating as up to date");
            Ok(Outcome::UpToDate(kind))
        }
        Err(source) => Err(ReconcileErr::Create { kind, source }),
    }
}
