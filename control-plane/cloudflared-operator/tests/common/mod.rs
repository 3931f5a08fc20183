#![allow(dead_code)]

use std::time::Duration;

use cloudflared_operator::config::OperatorConfig;
use cloudflared_operator::crd::{CloudflaredDeployment, CloudflaredDeploymentSpec};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    Client, CustomResourceExt,
    api::{Api, Patch, PatchParams, PostParams},
};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

// DNS-1123 safe numeric suffix for unique names
pub const DIGITS: [char; 10] =
    ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
pub fn uniq(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid::nanoid!(6, &DIGITS))
}

pub const NS: &str = "default";

/// Server-side apply the CRD and give the API server a moment to serve it.
pub async fn ensure_crd(client: Client) {
    let crd_api: Api<CustomResourceDefinition> = Api::all(client);
    let crd = CloudflaredDeployment::crd();
    let name = crd.metadata.name.clone().expect("crd name");
    crd_api
        .patch(
            &name,
            &PatchParams::apply("cloudflared-operator-it").force(),
            &Patch::Apply(&crd),
        )
        .await
        .expect("apply CRD");
    for _ in 0..30 {
        let established = crd_api
            .get_opt(&name)
            .await
            .ok()
            .flatten()
            .and_then(|c| c.status)
            .and_then(|s| s.conditions)
            .map(|cs| {
                cs.iter()
                    .any(|c| c.type_ == "Established" && c.status == "True")
            })
            .unwrap_or(false);
        if established {
            return;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("CRD {name} not established in time");
}

pub async fn create_record(
    client: Client,
    name: &str,
    spec: CloudflaredDeploymentSpec,
) -> CloudflaredDeployment {
    let api: Api<CloudflaredDeployment> = Api::namespaced(client, NS);
    api.create(&PostParams::default(), &CloudflaredDeployment::new(name, spec))
        .await
        .expect("create CloudflaredDeployment")
}

pub fn spawn_controller(client: Client) -> JoinHandle<()> {
    let cfg = OperatorConfig {
        watch_namespace: Some(NS.to_string()),
        error_requeue_secs: 2,
        ..Default::default()
    };
    tokio::spawn(async move {
        let _ = cloudflared_operator::controller::run_controller(client, cfg)
            .await;
    })
}

pub async fn wait_for<K>(client: Client, name: &str, secs: u64) -> Option<K>
where
    K: kube::Resource<
            Scope = k8s_openapi::NamespaceResourceScope,
            DynamicType = (),
        > + Clone
        + DeserializeOwned
        + std::fmt::Debug,
{
    let api: Api<K> = Api::namespaced(client, NS);
    for _ in 0..secs {
        if let Ok(Some(obj)) = api.get_opt(name).await {
            return Some(obj);
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }
    None
}

pub async fn cleanup_k8s(name: &str, client: Client) {
    let cd_api: Api<CloudflaredDeployment> = Api::namespaced(client.clone(), NS);
    let ds_api: Api<DaemonSet> = Api::namespaced(client.clone(), NS);
    let dep_api: Api<Deployment> = Api::namespaced(client, NS);
    let _ = cd_api.delete(name, &Default::default()).await;
    let _ = ds_api.delete(name, &Default::default()).await;
    let _ = dep_api.delete(name, &Default::default()).await;
}

// RAII guard to ensure controller abort + cleanup
pub struct ControllerGuard {
    name: String,
    client: Client,
    ctrl: Option<JoinHandle<()>>,
}

impl ControllerGuard {
    pub fn new(name: &str, client: Client) -> Self {
        Self {
            name: name.to_string(),
            client,
            ctrl: None,
        }
    }
    pub fn with_controller(mut self, ctrl: JoinHandle<()>) -> Self {
        self.ctrl = Some(ctrl);
        self
    }
}

impl Drop for ControllerGuard {
    fn drop(&mut self) {
        if let Some(ref handle) = self.ctrl {
            handle.abort();
        }
        let name = self.name.clone();
        let client = self.client.clone();
        let _ = tokio::spawn(async move {
            cleanup_k8s(&name, client).await;
        });
    }
}
