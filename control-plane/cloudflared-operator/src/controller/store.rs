use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, PostParams};
use kube::{Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::crd::{CloudflaredDeployment, WorkloadKind};
use crate::templates::ManagedWorkload;

/// The slice of the cluster API the reconciler consumes: reads of the record,
/// existence probes and creates of workloads. NotFound surfaces as `None` or
/// `false`; every other failure is returned as-is.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkloadStore: Send + Sync {
    async fn get_record(
        &self,
        ns: &str,
        name: &str,
    ) -> Result<Option<CloudflaredDeployment>, kube::Error>;

    async fn workload_exists(
        &self,
        kind: WorkloadKind,
        ns: &str,
        name: &str,
    ) -> Result<bool, kube::Error>;

    async fn create_workload(
        &self,
        workload: &ManagedWorkload,
    ) -> Result<(), kube::Error>;
}

#[derive(Clone)]
pub struct KubeWorkloadStore {
    client: Client,
}

impl KubeWorkloadStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, ns: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>,
    {
        Api::namespaced(self.client.clone(), ns)
    }

    async fn exists<K>(&self, ns: &str, name: &str) -> Result<bool, kube::Error>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + std::fmt::Debug,
    {
        Ok(self.api::<K>(ns).get_opt(name).await?.is_some())
    }

    async fn create<K>(&self, ns: &str, obj: &K) -> Result<(), kube::Error>
    where
        K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
            + Clone
            + DeserializeOwned
            + Serialize
            + std::fmt::Debug,
    {
        let _ = self.api::<K>(ns).create(&PostParams::default(), obj).await?;
        Ok(())
    }
}

#[async_trait]
impl WorkloadStore for KubeWorkloadStore {
    async fn get_record(
        &self,
        ns: &str,
        name: &str,
    ) -> Result<Option<CloudflaredDeployment>, kube::Error> {
        self.api::<CloudflaredDeployment>(ns).get_opt(name).await
    }

    async fn workload_exists(
        &self,
        kind: WorkloadKind,
        ns: &str,
        name: &str,
    ) -> Result<bool, kube::Error> {
        match kind {
            WorkloadKind::DaemonSet => self.exists::<DaemonSet>(ns, name).await,
            WorkloadKind::Deployment => self.exists::<Deployment>(ns, name).await,
        }
    }

    async fn create_workload(
        &self,
        workload: &ManagedWorkload,
    ) -> Result<(), kube::Error> {
        let ns = workload.namespace().unwrap_or("default");
        debug!(%ns, name = %workload.name(), kind = %workload.kind(), "store: create");
        match workload {
            ManagedWorkload::DaemonSet(ds) => self.create(ns, ds).await,
            ManagedWorkload::Deployment(d) => self.create(ns, d).await,
        }
    }
}

/// True when the API server answered with the given HTTP status.
pub fn is_status(err: &kube::Error, code: u16) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == code)
}

pub fn is_already_exists(err: &kube::Error) -> bool {
    is_status(err, 409)
}
