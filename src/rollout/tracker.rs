//! Per-poll rollout state machine

use std::time::Duration;

use tokio::time::Instant;

use crate::models::{ContainerIssue, PodCounts, RolloutSnapshot};

/// How a converged rollout finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutOutcome {
    /// New pods ready and every old pod gone
    Complete {
        total: Duration,
        cleanup: Option<Duration>,
    },
    /// New pods ready but old pods outlived the cleanup grace period
    CleanupOverdue { total: Duration, cleanup: Duration },
}

/// Result of evaluating one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Converged(RolloutOutcome),
    /// First poll where new pods are ready while old ones still terminate
    NewPodsReady { elapsed: Duration },
    /// Still waiting on old pods, already reported
    AwaitingCleanup,
    Progressing { counts: PodCounts, desired: i32 },
}

impl Verdict {
    pub fn outcome(&self) -> Option<RolloutOutcome> {
        match self {
            Verdict::Converged(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// User-facing lines for this verdict
    pub fn render(&self, name: &str, snapshot: &RolloutSnapshot) -> Vec<String> {
        match self {
            Verdict::Converged(RolloutOutcome::Complete {
                total,
                cleanup: None,
            }) => vec![format!(
                "✅ Deployment {} successfully rolled out (took {})",
                name,
                format_duration(*total)
            )],
            Verdict::Converged(RolloutOutcome::Complete {
                total,
                cleanup: Some(cleanup),
            }) => vec![format!(
                "✅ Deployment {} successfully rolled out (took {} total, cleanup {})",
                name,
                format_duration(*total),
                format_duration(*cleanup)
            )],
            Verdict::Converged(RolloutOutcome::CleanupOverdue { total, cleanup }) => vec![
                "⚠️ Old pods cleanup taking longer than expected, but deployment is ready"
                    .to_string(),
                format!(
                    "✅ Deployment {} successfully rolled out (took {} total, cleanup {} ongoing)",
                    name,
                    format_duration(*total),
                    format_duration(*cleanup)
                ),
            ],
            Verdict::NewPodsReady { elapsed } => vec![format!(
                "✅ New pods are ready (took {}), waiting for old pods cleanup...",
                format_duration(*elapsed)
            )],
            Verdict::AwaitingCleanup => Vec::new(),
            Verdict::Progressing { counts, desired } => {
                let mut lines = vec![format!(
                    "⏳ Waiting for rollout to finish: {}/{} pods ready, {} pending, {} terminating",
                    counts.running, desired, counts.pending, counts.terminating
                )];
                for pod in snapshot.pods.iter().filter(|p| p.needs_attention()) {
                    lines.push(format!("🔍 Pod {} status: {}", pod.name, pod.raw_phase));
                    for issue in &pod.issues {
                        lines.push(match issue {
                            ContainerIssue::Waiting {
                                container,
                                reason,
                                message,
                            } => format!(
                                "    Container {} is waiting: {} - {}",
                                container, reason, message
                            ),
                            ContainerIssue::Terminated {
                                container,
                                reason,
                                message,
                            } => format!(
                                "    Container {} terminated: {} - {}",
                                container, reason, message
                            ),
                        });
                    }
                }
                lines
            }
        }
    }
}

/// In-memory state of one wait
///
/// Holds the wait's start and the first time new pods were seen ready
/// while old pods were still terminating.
#[derive(Debug, Clone)]
pub struct RolloutTracker {
    start: Instant,
    first_ready: Option<Instant>,
    cleanup_grace: Duration,
}

impl RolloutTracker {
    pub fn new(start: Instant, cleanup_grace: Duration) -> Self {
        Self {
            start,
            first_ready: None,
            cleanup_grace,
        }
    }

    /// Evaluate one snapshot taken at `now`
    pub fn observe(&mut self, snapshot: &RolloutSnapshot, now: Instant) -> Verdict {
        let deployment_ready = snapshot.deployment_ready();
        let counts = snapshot.pod_counts();
        let desired = snapshot.desired_replicas;
        let new_pods_ready = deployment_ready && counts.running == desired;
        let total = now.saturating_duration_since(self.start);

        if new_pods_ready && counts.terminating == 0 {
            return Verdict::Converged(RolloutOutcome::Complete {
                total,
                cleanup: self
                    .first_ready
                    .map(|ready| now.saturating_duration_since(ready)),
            });
        }

        if new_pods_ready {
            let Some(ready) = self.first_ready else {
                self.first_ready = Some(now);
                return Verdict::NewPodsReady { elapsed: total };
            };
            let cleanup = now.saturating_duration_since(ready);
            if cleanup > self.cleanup_grace {
                return Verdict::Converged(RolloutOutcome::CleanupOverdue { total, cleanup });
            }
            return Verdict::AwaitingCleanup;
        }

        Verdict::Progressing { counts, desired }
    }
}

/// Render a duration rounded to milliseconds, e.g. `350ms`, `12.5s`, `1m5s`
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        return format!("{millis}ms");
    }
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) as f64 / 1000.0;
    if minutes == 0 {
        format!("{seconds}s")
    } else {
        format!("{minutes}m{seconds}s")
    }
}
