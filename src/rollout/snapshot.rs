//! Snapshot construction from deployment and pod objects

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;

use crate::models::{ContainerIssue, PodPhase, PodSummary, RolloutSnapshot};

const PROGRESSING: &str = "Progressing";
const NEW_REPLICA_SET_AVAILABLE: &str = "NewReplicaSetAvailable";

/// Build a snapshot from one poll's deployment and pod list
///
/// The desired count is the deployment's `status.replicas`.
pub fn snapshot_from(deployment: &Deployment, pods: &[Pod]) -> RolloutSnapshot {
    let status = deployment.status.clone().unwrap_or_default();

    let progressing_condition_true = status.conditions.iter().flatten().any(|condition| {
        condition.type_ == PROGRESSING
            && condition.status == "True"
            && condition.reason.as_deref() == Some(NEW_REPLICA_SET_AVAILABLE)
    });

    RolloutSnapshot {
        desired_replicas: status.replicas.unwrap_or(0),
        updated_replicas: status.updated_replicas.unwrap_or(0),
        ready_replicas: status.ready_replicas.unwrap_or(0),
        available_replicas: status.available_replicas.unwrap_or(0),
        observed_generation: status.observed_generation.unwrap_or(0),
        generation: deployment.metadata.generation.unwrap_or(0),
        progressing_condition_true,
        pods: pods.iter().map(summarize_pod).collect(),
    }
}

/// Classify a pod and collect reasons for its unready containers
///
/// A deletion timestamp marks the pod `Terminating` whatever its phase. A
/// running pod with no container statuses counts as all-ready.
pub fn summarize_pod(pod: &Pod) -> PodSummary {
    let name = pod.metadata.name.clone().unwrap_or_default();
    let status = pod.status.as_ref();
    let raw_phase = status
        .and_then(|s| s.phase.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let container_statuses = status
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or_default();

    let all_containers_ready = container_statuses.iter().all(|c| c.ready);

    let (phase, raw_phase) = if pod.metadata.deletion_timestamp.is_some() {
        (PodPhase::Terminating, "Terminating".to_string())
    } else {
        let phase = match raw_phase.as_str() {
            "Running" => PodPhase::Running,
            "Pending" => PodPhase::Pending,
            _ => PodPhase::Other,
        };
        (phase, raw_phase)
    };

    let issues = container_statuses
        .iter()
        .filter(|c| !c.ready)
        .filter_map(|c| {
            let state = c.state.as_ref()?;
            if let Some(waiting) = &state.waiting {
                return Some(ContainerIssue::Waiting {
                    container: c.name.clone(),
                    reason: waiting.reason.clone().unwrap_or_default(),
                    message: waiting.message.clone().unwrap_or_default(),
                });
            }
            state
                .terminated
                .as_ref()
                .map(|terminated| ContainerIssue::Terminated {
                    container: c.name.clone(),
                    reason: terminated.reason.clone().unwrap_or_default(),
                    message: terminated.message.clone().unwrap_or_default(),
                })
        })
        .collect();

    PodSummary {
        name,
        phase,
        raw_phase,
        all_containers_ready,
        issues,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{DeploymentCondition, DeploymentStatus};
    use k8s_openapi::api::core::v1::{
        ContainerState, ContainerStateTerminated, ContainerStateWaiting, ContainerStatus,
        PodStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

    fn deletion_time() -> Time {
        serde_json::from_value(serde_json::json!("2024-01-01T00:00:00Z")).unwrap()
    }

    pub(crate) fn container_status(name: &str, ready: bool) -> ContainerStatus {
        ContainerStatus {
            name: name.to_string(),
            ready,
            ..Default::default()
        }
    }

    pub(crate) fn pod(name: &str, phase: &str, ready: bool, deleting: bool) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                deletion_timestamp: deleting.then(deletion_time),
                ..Default::default()
            },
            spec: None,
            status: Some(PodStatus {
                phase: Some(phase.to_string()),
                container_statuses: Some(vec![container_status("app", ready)]),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_deletion_marker_wins_over_phase() {
        let summary = summarize_pod(&pod("web-1", "Running", true, true));
        assert_eq!(summary.phase, PodPhase::Terminating);
        assert_eq!(summary.raw_phase, "Terminating");
        assert!(!summary.is_ready_running());
    }

    #[test]
    fn test_running_readiness() {
        assert!(summarize_pod(&pod("web-1", "Running", true, false)).is_ready_running());
        let unready = summarize_pod(&pod("web-1", "Running", false, false));
        assert_eq!(unready.phase, PodPhase::Running);
        assert!(!unready.is_ready_running());
    }

    #[test]
    fn test_other_phases() {
        assert_eq!(
            summarize_pod(&pod("web-1", "Pending", false, false)).phase,
            PodPhase::Pending
        );
        let failed = summarize_pod(&pod("web-1", "Failed", false, false));
        assert_eq!(failed.phase, PodPhase::Other);
        assert_eq!(failed.raw_phase, "Failed");
    }

    #[test]
    fn test_container_issues() {
        let mut p = pod("web-1", "Pending", false, false);
        p.status.as_mut().unwrap().container_statuses = Some(vec![
            ContainerStatus {
                state: Some(ContainerState {
                    waiting: Some(ContainerStateWaiting {
                        reason: Some("ImagePullBackOff".to_string()),
                        message: Some("Back-off pulling image".to_string()),
                    }),
                    ..Default::default()
                }),
                ..container_status("app", false)
            },
            ContainerStatus {
                state: Some(ContainerState {
                    terminated: Some(ContainerStateTerminated {
                        reason: Some("Error".to_string()),
                        exit_code: 1,
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..container_status("init", false)
            },
            container_status("sidecar", true),
        ]);

        let summary = summarize_pod(&p);
        assert_eq!(
            summary.issues,
            vec![
                ContainerIssue::Waiting {
                    container: "app".to_string(),
                    reason: "ImagePullBackOff".to_string(),
                    message: "Back-off pulling image".to_string(),
                },
                ContainerIssue::Terminated {
                    container: "init".to_string(),
                    reason: "Error".to_string(),
                    message: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_snapshot_from_status() {
        let deployment = Deployment {
            metadata: ObjectMeta {
                generation: Some(4),
                ..Default::default()
            },
            spec: None,
            status: Some(DeploymentStatus {
                replicas: Some(3),
                updated_replicas: Some(3),
                ready_replicas: Some(2),
                available_replicas: Some(2),
                observed_generation: Some(4),
                conditions: Some(vec![DeploymentCondition {
                    type_: "Progressing".to_string(),
                    status: "True".to_string(),
                    reason: Some("NewReplicaSetAvailable".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
        };
        let snap = snapshot_from(&deployment, &[pod("web-1", "Running", true, false)]);
        assert_eq!(snap.desired_replicas, 3);
        assert_eq!(snap.ready_replicas, 2);
        assert_eq!(snap.generation, 4);
        assert!(snap.progressing_condition_true);
        assert!(snap.deployment_ready());
        assert_eq!(snap.pods.len(), 1);
    }

    #[test]
    fn test_progressing_with_other_reason() {
        let deployment = Deployment {
            status: Some(DeploymentStatus {
                replicas: Some(3),
                conditions: Some(vec![DeploymentCondition {
                    type_: "Progressing".to_string(),
                    status: "True".to_string(),
                    reason: Some("ReplicaSetUpdated".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let snap = snapshot_from(&deployment, &[]);
        assert!(!snap.progressing_condition_true);
        assert!(!snap.deployment_ready());
    }
}
