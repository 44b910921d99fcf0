//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server, namespace discovery from
//! the local kubeconfig, and the [`ResourceClient`] seam the image services
//! are written against.

mod client;

use anyhow::{Context, Result};
use kube::Client;
use kube::config::Kubeconfig;

pub use client::{KubeResourceClient, ResourceClient};
#[cfg(test)]
pub use client::MockResourceClient;

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    Client::try_default()
        .await
        .context("failed to create Kubernetes client")
}

/// Namespace of the current kubeconfig context
///
/// Returns `None` when the kubeconfig cannot be read or the current context
/// has no namespace; callers fall back to their configured default.
pub fn current_context_namespace() -> Option<String> {
    let kubeconfig = match Kubeconfig::read() {
        Ok(kubeconfig) => kubeconfig,
        Err(e) => {
            tracing::debug!("Could not read kubeconfig: {}", e);
            return None;
        }
    };
    context_namespace(&kubeconfig)
}

fn context_namespace(kubeconfig: &Kubeconfig) -> Option<String> {
    let current = kubeconfig.current_context.as_deref()?;
    kubeconfig
        .contexts
        .iter()
        .find(|named| named.name == current)
        .and_then(|named| named.context.as_ref())
        .and_then(|context| context.namespace.clone())
        .filter(|ns| !ns.is_empty())
}
