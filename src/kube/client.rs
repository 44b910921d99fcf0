//! Resource client for workload operations
//!
//! [`ResourceClient`] is the only way the image services talk to the API
//! server. [`KubeResourceClient`] backs it with kube-rs; tests use the
//! generated `MockResourceClient`.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::Api;
use kube::api::{ListParams, PostParams};
use kube::core::Selector;

use crate::error::ClientError;
use crate::models::WorkloadKind;

/// Get/update/list operations on workloads, addressed by namespace and name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn get_deployment(&self, namespace: &str, name: &str)
    -> Result<Deployment, ClientError>;

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, ClientError>;

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClientError>;

    async fn list_pods(&self, namespace: &str, selector: &Selector)
    -> Result<Vec<Pod>, ClientError>;
}

/// [`ResourceClient`] backed by a kube-rs [`kube::Client`]
#[derive(Clone)]
pub struct KubeResourceClient {
    client: kube::Client,
}

impl KubeResourceClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

fn map_error(kind: WorkloadKind, name: &str, err: kube::Error) -> ClientError {
    match err {
        kube::Error::Api(response) if response.code == 404 => ClientError::NotFound {
            kind,
            name: name.to_string(),
        },
        kube::Error::Api(response) if response.code == 409 => {
            ClientError::Conflict(response.message)
        }
        other => ClientError::Transport(other.to_string()),
    }
}

#[async_trait]
impl ResourceClient for KubeResourceClient {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, ClientError> {
        tracing::debug!("Fetching deployment {}/{}", namespace, name);
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| map_error(WorkloadKind::Deployment, name, e))
    }

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, ClientError> {
        let name = deployment.metadata.name.as_deref().unwrap_or_default();
        tracing::debug!("Replacing deployment {}/{}", namespace, name);
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        api.replace(name, &PostParams::default(), deployment)
            .await
            .map_err(|e| map_error(WorkloadKind::Deployment, name, e))
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClientError> {
        tracing::debug!("Fetching pod {}/{}", namespace, name);
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|e| map_error(WorkloadKind::Pod, name, e))
    }

    async fn list_pods(
        &self,
        namespace: &str,
        selector: &Selector,
    ) -> Result<Vec<Pod>, ClientError> {
        tracing::debug!("Listing pods in {} with selector '{}'", namespace, selector);
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = ListParams::default().labels_from(selector);
        api.list(&params)
            .await
            .map(|list| list.items)
            .map_err(|e| ClientError::Transport(e.to_string()))
    }
}
