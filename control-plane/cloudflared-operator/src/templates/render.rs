use k8s_openapi::api::core::v1::{PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, ObjectMeta, OwnerReference,
};
use kube::ResourceExt;

use super::defaults::WorkloadDefaults;
use super::workload::WorkloadParts;
use crate::crd::CloudflaredDeployment;
use crate::crd::cloudflared_deployment::{GROUP, KIND, VERSION};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DeriveError {
    #[error("{0} has no uid; cannot be referenced as an owner")]
    MissingUid(String),
}

/// Build the selector and pod template for a CloudflaredDeployment.
///
/// Starts from the defaults (one `<app>` container running the default image,
/// labelled `app=<app>`), then applies the optional template override. Override
/// labels and containers each replace the defaults wholesale; nothing is merged.
/// The selector always mirrors the final pod labels.
pub fn derive_parts(
    cd: &CloudflaredDeployment,
    defaults: &WorkloadDefaults,
) -> WorkloadParts {
    let mut labels = defaults.labels();
    let mut containers = vec![defaults.container()];

    if let Some(tpl) = cd.spec.template.as_ref() {
        if let Some(custom) = tpl
            .metadata
            .as_ref()
            .and_then(|m| m.labels.as_ref())
            .filter(|l| !l.is_empty())
        {
            labels = custom.clone();
        }
        if let Some(custom) = tpl
            .spec
            .as_ref()
            .map(|s| &s.containers)
            .filter(|c| !c.is_empty())
        {
            containers = custom.clone();
        }
    }

    WorkloadParts {
        metadata: ObjectMeta {
            name: Some(cd.name_any()),
            namespace: cd.namespace(),
            ..Default::default()
        },
        selector: LabelSelector {
            match_labels: Some(labels.clone()),
            ..Default::default()
        },
        template: PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: Some(labels),
                ..Default::default()
            }),
            spec: Some(PodSpec {
                containers,
                ..Default::default()
            }),
        },
    }
}

/// Controller owner reference pointing back at the CloudflaredDeployment, so the
/// platform garbage collector removes the workload with its owner.
pub fn owner_ref(cd: &CloudflaredDeployment) -> Result<OwnerReference, DeriveError> {
    let name = cd.name_any();
    let uid = cd
        .uid()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| DeriveError::MissingUid(name.clone()))?;
    Ok(OwnerReference {
        api_version: format!("{}/{}", GROUP, VERSION),
        kind: KIND.to_string(),
        name,
        uid,
        controller: Some(true),
        block_owner_deletion: Some(true),
    })
}
