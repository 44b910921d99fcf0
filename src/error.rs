//! Error types for image operations
//!
//! `ClientError` is what the Kubernetes seam reports; `ImageError` is what
//! the mutator, reader and rollout monitor surface to the command layer.

use std::time::Duration;

use crate::models::WorkloadKind;

/// Fixed message for attempts to mutate a pod directly
pub const PODS_IMMUTABLE_MESSAGE: &str = "direct pod image update is not supported - pods are immutable. Please update the deployment or other controller instead";

/// Errors reported by a [`ResourceClient`](crate::kube::ResourceClient)
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("{kind} {name} not found")]
    NotFound { kind: WorkloadKind, name: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Errors surfaced by image get/set and rollout monitoring
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("{0}")]
    Validation(String),

    #[error("unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    #[error("{}", PODS_IMMUTABLE_MESSAGE)]
    PodsImmutable,

    #[error("{kind} {name} not found")]
    NotFound { kind: WorkloadKind, name: String },

    #[error("no containers found in {kind} {name}")]
    NoContainers { kind: WorkloadKind, name: String },

    #[error("container {container} not found in {kind} {name}")]
    ContainerNotFound {
        container: String,
        kind: WorkloadKind,
        name: String,
    },

    #[error("failed to update {kind} {name}: {source}")]
    Persistence {
        kind: WorkloadKind,
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to {action} {kind} {name}: {source}")]
    Transport {
        action: &'static str,
        kind: WorkloadKind,
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("deployment {name} has an invalid label selector: {source}")]
    InvalidSelector {
        name: String,
        #[source]
        source: kube::core::ParseExpressionError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error(
        "timeout waiting for deployment {name} rollout to complete after {}s, check its status with `kubectl rollout status deployment/{name}`",
        .timeout.as_secs()
    )]
    Timeout { name: String, timeout: Duration },
}

impl ImageError {
    /// Map a failed fetch onto `NotFound` or `Transport`
    pub(crate) fn from_fetch(kind: WorkloadKind, name: &str, err: ClientError) -> Self {
        if err.is_not_found() {
            ImageError::NotFound {
                kind,
                name: name.to_string(),
            }
        } else {
            ImageError::Transport {
                action: "get",
                kind,
                name: name.to_string(),
                source: err,
            }
        }
    }
}

/// Result type for image operations
pub type ImageResult<T> = Result<T, ImageError>;
