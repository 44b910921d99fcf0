//! Point-in-time rollout observations
//!
//! A [`RolloutSnapshot`] is built once per poll from the deployment and the
//! pods its selector matches. Nothing here is persisted between polls.

/// Pod lifecycle phase as seen by the rollout monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodPhase {
    Pending,
    Running,
    Terminating,
    Other,
}

impl PodPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodPhase::Pending => "Pending",
            PodPhase::Running => "Running",
            PodPhase::Terminating => "Terminating",
            PodPhase::Other => "Other",
        }
    }
}

/// Why a container is not ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerIssue {
    Waiting {
        container: String,
        reason: String,
        message: String,
    },
    Terminated {
        container: String,
        reason: String,
        message: String,
    },
}

/// Status of a single pod selected by the deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub phase: PodPhase,
    /// Raw phase reported by the API server, kept for progress output
    pub raw_phase: String,
    pub all_containers_ready: bool,
    pub issues: Vec<ContainerIssue>,
}

impl PodSummary {
    pub fn new(name: impl Into<String>, phase: PodPhase, all_containers_ready: bool) -> Self {
        Self {
            name: name.into(),
            phase,
            raw_phase: phase.as_str().to_string(),
            all_containers_ready,
            issues: Vec::new(),
        }
    }

    pub fn is_ready_running(&self) -> bool {
        self.phase == PodPhase::Running && self.all_containers_ready
    }

    /// Pods worth a detail line in progress output
    pub fn needs_attention(&self) -> bool {
        self.phase != PodPhase::Running
    }
}

/// Deployment and pod state observed in one poll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolloutSnapshot {
    pub desired_replicas: i32,
    pub updated_replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
    pub observed_generation: i64,
    pub generation: i64,
    pub progressing_condition_true: bool,
    pub pods: Vec<PodSummary>,
}

/// Pod counts derived from a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodCounts {
    pub running: i32,
    pub pending: i32,
    pub terminating: i32,
    pub other: i32,
}

impl RolloutSnapshot {
    /// Either the `NewReplicaSetAvailable` condition or fully caught-up counters
    pub fn deployment_ready(&self) -> bool {
        if self.progressing_condition_true {
            return true;
        }
        self.updated_replicas == self.desired_replicas
            && self.ready_replicas == self.desired_replicas
            && self.available_replicas == self.desired_replicas
            && self.observed_generation >= self.generation
    }

    pub fn pod_counts(&self) -> PodCounts {
        let mut counts = PodCounts::default();
        for pod in &self.pods {
            match pod.phase {
                PodPhase::Terminating => counts.terminating += 1,
                _ if pod.is_ready_running() => counts.running += 1,
                PodPhase::Running | PodPhase::Pending => counts.pending += 1,
                PodPhase::Other => counts.other += 1,
            }
        }
        counts
    }
}
