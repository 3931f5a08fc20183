pub mod cloudflared_deployment;

pub use cloudflared_deployment::{
    CloudflaredDeployment, CloudflaredDeploymentSpec,
    CloudflaredDeploymentStatus, KindResolution, WorkloadKind, resolve_kind,
};
