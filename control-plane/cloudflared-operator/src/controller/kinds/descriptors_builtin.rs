use k8s_openapi::api::apps::v1::{
    DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec,
};

use super::descriptor::KindDescriptor;
use crate::crd::WorkloadKind;
use crate::templates::{ManagedWorkload, WorkloadParts};

fn build_daemonset(parts: WorkloadParts) -> ManagedWorkload {
    ManagedWorkload::DaemonSet(DaemonSet {
        metadata: parts.metadata,
        spec: Some(DaemonSetSpec {
            selector: parts.selector,
            template: parts.template,
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn build_deployment(parts: WorkloadParts) -> ManagedWorkload {
    ManagedWorkload::Deployment(Deployment {
        metadata: parts.metadata,
        spec: Some(DeploymentSpec {
            selector: parts.selector,
            template: parts.template,
            ..Default::default()
        }),
        ..Default::default()
    })
}

static DAEMONSET: KindDescriptor = KindDescriptor {
    build: build_daemonset,
};

static DEPLOYMENT: KindDescriptor = KindDescriptor {
    build: build_deployment,
};

pub fn descriptor_for(kind: WorkloadKind) -> KindDescriptor {
    match kind {
        WorkloadKind::DaemonSet => DAEMONSET,
        WorkloadKind::Deployment => DEPLOYMENT,
    }
}
