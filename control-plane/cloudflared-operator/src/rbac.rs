use k8s_openapi::api::rbac::v1::{ClusterRole, PolicyRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::crd::cloudflared_deployment::{GROUP, PLURAL};

fn rule(group: &str, resources: &[&str], verbs: &[&str]) -> PolicyRule {
    PolicyRule {
        api_groups: Some(vec![group.to_string()]),
        resources: Some(resources.iter().map(|r| r.to_string()).collect()),
        verbs: verbs.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}

/// Permissions the operator needs. Declared here for deployment manifests;
/// nothing in the controller checks them.
pub fn policy_rules() -> Vec<PolicyRule> {
    let status = format!("{PLURAL}/status");
    let finalizers = format!("{PLURAL}/finalizers");
    vec![
        rule(
            GROUP,
            &[PLURAL],
            &["get", "list", "watch", "create", "update", "patch", "delete"],
        ),
        rule(GROUP, &[status.as_str()], &["get", "update", "patch"]),
        rule(GROUP, &[finalizers.as_str()], &["update"]),
        rule(
            "apps",
            &["daemonsets", "deployments"],
            &["get", "list", "watch", "create"],
        ),
    ]
}

pub fn cluster_role(name: &str) -> ClusterRole {
    ClusterRole {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        rules: Some(policy_rules()),
        ..Default::default()
    }
}
