use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const GROUP: &str = "cloudflare.cloudflare.unmango.net";
pub const VERSION: &str = "v1alpha1";
pub const KIND: &str = "CloudflaredDeployment";
pub const PLURAL: &str = "cloudflareddeployments";

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(
    group = "cloudflare.cloudflare.unmango.net",
    version = "v1alpha1",
    kind = "CloudflaredDeployment",
    plural = "cloudflareddeployments",
    namespaced,
    status = "CloudflaredDeploymentStatus",
    printcolumn = r#"{"name":"Replicas","type":"integer","jsonPath":".status.replicas"}"#,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".status.state"}"#
)]
pub struct CloudflaredDeploymentSpec {
    /// Workload kind to run: "DaemonSet" (one pod per node) or "Deployment".
    /// Empty or omitted means DaemonSet.
    #[serde(
        default = "default_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Optional pod template. Its labels and containers replace the defaults
    /// wholesale when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq, Eq)]
pub struct CloudflaredDeploymentStatus {
    #[serde(default)]
    pub state: String,
}

fn default_kind() -> Option<String> {
    Some(WorkloadKind::DaemonSet.as_str().to_string())
}

/// The two workload shapes a CloudflaredDeployment can be realized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    DaemonSet,
    Deployment,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 2] =
        [WorkloadKind::DaemonSet, WorkloadKind::Deployment];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::DaemonSet => "DaemonSet",
            WorkloadKind::Deployment => "Deployment",
        }
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KindResolution {
    Resolved(WorkloadKind),
    /// Explicit value that names neither kind; carries the raw value for logging.
    Invalid(String),
}

/// Resolve a `spec.kind` string. Matching is case-sensitive.
pub fn resolve_kind(raw: Option<&str>) -> KindResolution {
    match raw {
        None | Some("") | Some("DaemonSet") => {
            KindResolution::Resolved(WorkloadKind::DaemonSet)
        }
        Some("Deployment") => KindResolution::Resolved(WorkloadKind::Deployment),
        Some(other) => KindResolution::Invalid(other.to_string()),
    }
}

impl CloudflaredDeploymentSpec {
    pub fn resolved_kind(&self) -> KindResolution {
        resolve_kind(self.kind.as_deref())
    }
}
