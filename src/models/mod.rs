//! Workload model layer
//!
//! Plain data types shared by the image services and the rollout monitor.
//! They carry no Kubernetes client state.

pub mod image;
pub mod rollout;
pub mod workload;

pub use image::{ContainerImageChange, ContainerImageState, ImageSpec, MutationResult};
pub use rollout::{ContainerIssue, PodCounts, PodPhase, PodSummary, RolloutSnapshot};
pub use workload::{WorkloadKind, WorkloadRef};
