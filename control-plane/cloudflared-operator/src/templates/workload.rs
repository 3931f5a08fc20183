use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::{Container, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, ObjectMeta, OwnerReference,
};

use crate::crd::WorkloadKind;

/// Kind-agnostic pieces of a managed workload: identity, selector and pod
/// template. A kind descriptor turns these into the concrete object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkloadParts {
    pub metadata: ObjectMeta,
    pub selector: LabelSelector,
    pub template: PodTemplateSpec,
}

impl WorkloadParts {
    pub fn with_owner(mut self, owner: OwnerReference) -> Self {
        self.metadata
            .owner_references
            .get_or_insert_with(Vec::new)
            .push(owner);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ManagedWorkload {
    DaemonSet(DaemonSet),
    Deployment(Deployment),
}

impl ManagedWorkload {
    pub fn kind(&self) -> WorkloadKind {
        match self {
            ManagedWorkload::DaemonSet(_) => WorkloadKind::DaemonSet,
            ManagedWorkload::Deployment(_) => WorkloadKind::Deployment,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ManagedWorkload::DaemonSet(ds) => &ds.metadata,
            ManagedWorkload::Deployment(d) => &d.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    pub fn owner_references(&self) -> &[OwnerReference] {
        self.metadata()
            .owner_references
            .as_deref()
            .unwrap_or_default()
    }

    pub fn selector(&self) -> Option<&LabelSelector> {
        match self {
            ManagedWorkload::DaemonSet(ds) => ds.spec.as_ref().map(|s| &s.selector),
            ManagedWorkload::Deployment(d) => d.spec.as_ref().map(|s| &s.selector),
        }
    }

    pub fn template(&self) -> Option<&PodTemplateSpec> {
        match self {
            ManagedWorkload::DaemonSet(ds) => ds.spec.as_ref().map(|s| &s.template),
            ManagedWorkload::Deployment(d) => d.spec.as_ref().map(|s| &s.template),
        }
    }

    pub fn selector_labels(&self) -> Option<&BTreeMap<String, String>> {
        self.selector().and_then(|s| s.match_labels.as_ref())
    }

    pub fn template_labels(&self) -> Option<&BTreeMap<String, String>> {
        self.template()
            .and_then(|t| t.metadata.as_ref())
            .and_then(|m| m.labels.as_ref())
    }

    pub fn containers(&self) -> &[Container] {
        self.template()
            .and_then(|t| t.spec.as_ref())
            .map(|s| s.containers.as_slice())
            .unwrap_or_default()
    }
}
