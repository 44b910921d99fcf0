//! kubectl-image library
//!
//! Core functionality of the `kubectl image` plugin: reading and rewriting
//! container images of deployments and pods, and waiting for the resulting
//! rollout to converge. Used by the binary and by the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod kube;
pub mod models;
pub mod rollout;
pub mod services;
pub mod validator;

// Re-export commonly used types for convenience
pub use error::{ClientError, ImageError, ImageResult};
pub use image::{extract_tag, rewrite};
pub use models::{ImageSpec, RolloutSnapshot, WorkloadKind, WorkloadRef};
pub use rollout::{RolloutMonitor, RolloutOutcome, RolloutSettings, RolloutTracker, Verdict};
pub use services::{ImageMutator, ImageReader};
