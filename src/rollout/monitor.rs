//! Polling loop driving the rollout tracker

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use k8s_openapi::api::apps::v1::Deployment;
use kube::core::Selector;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};

use super::snapshot::snapshot_from;
use super::tracker::{RolloutOutcome, RolloutTracker};
use crate::error::{ImageError, ImageResult};
use crate::kube::ResourceClient;
use crate::models::{RolloutSnapshot, WorkloadKind, WorkloadRef};

/// Timing parameters of a rollout wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub cleanup_grace: Duration,
}

impl Default for RolloutSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
            cleanup_grace: Duration::from_secs(60),
        }
    }
}

impl RolloutSettings {
    /// The timeout must leave room for at least one poll
    pub fn validate(&self) -> ImageResult<()> {
        if self.poll_interval.is_zero() {
            return Err(ImageError::Validation(
                "rollout poll interval must be greater than 0".to_string(),
            ));
        }
        if self.timeout <= self.poll_interval {
            return Err(ImageError::Validation(format!(
                "rollout timeout ({}s) must be greater than the poll interval ({}s)",
                self.timeout.as_secs(),
                self.poll_interval.as_secs()
            )));
        }
        Ok(())
    }
}

/// Waits for a deployment rollout to converge
pub struct RolloutMonitor {
    client: Arc<dyn ResourceClient>,
    settings: RolloutSettings,
}

impl RolloutMonitor {
    pub fn new(client: Arc<dyn ResourceClient>, settings: RolloutSettings) -> Self {
        Self { client, settings }
    }

    /// Poll until the rollout converges or the deadline passes
    ///
    /// The first poll happens one interval after the call. Any API error
    /// ends the wait immediately.
    pub async fn wait<W: Write + Send>(
        &self,
        target: &WorkloadRef,
        out: &mut W,
    ) -> ImageResult<RolloutOutcome> {
        if target.kind() != WorkloadKind::Deployment {
            return Err(ImageError::UnsupportedResourceType(format!(
                "{} (only deployments can be monitored)",
                target.kind()
            )));
        }
        self.settings.validate()?;

        let name = target.name();
        emit(out, &format!("Waiting for deployment {} rollout to complete...", name))?;

        let start = Instant::now();
        let mut tracker = RolloutTracker::new(start, self.settings.cleanup_grace);
        let deadline = sleep(self.settings.timeout);
        tokio::pin!(deadline);
        let mut ticker = interval_at(start + self.settings.poll_interval, self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = &mut deadline => {
                    tracing::warn!("Timed out waiting for {}", target);
                    return Err(ImageError::Timeout {
                        name: name.to_string(),
                        timeout: self.settings.timeout,
                    });
                }
                _ = ticker.tick() => {
                    let snapshot = self.poll(target).await?;
                    let verdict = tracker.observe(&snapshot, Instant::now());
                    tracing::debug!("Rollout of {}: {:?}", target, verdict);

                    for line in verdict.render(name, &snapshot) {
                        emit(out, &line)?;
                    }
                    if let Some(outcome) = verdict.outcome() {
                        if matches!(outcome, RolloutOutcome::CleanupOverdue { .. }) {
                            tracing::warn!("Old pods of {} still terminating", target);
                        }
                        return Ok(outcome);
                    }
                }
            }
        }
    }

    async fn poll(&self, target: &WorkloadRef) -> ImageResult<RolloutSnapshot> {
        let name = target.name();
        let deployment = self
            .client
            .get_deployment(target.namespace(), name)
            .await
            .map_err(|e| ImageError::from_fetch(WorkloadKind::Deployment, name, e))?;

        let selector = pod_selector(&deployment, name)?;
        let pods = self
            .client
            .list_pods(target.namespace(), &selector)
            .await
            .map_err(|source| ImageError::Transport {
                action: "list pods for",
                kind: WorkloadKind::Deployment,
                name: name.to_string(),
                source,
            })?;

        Ok(snapshot_from(&deployment, &pods))
    }
}

/// Selector matching the deployment's pods
///
/// An empty selector would match every pod in the namespace, so it is
/// rejected along with unparseable expressions.
fn pod_selector(deployment: &Deployment, name: &str) -> ImageResult<Selector> {
    let label_selector = deployment
        .spec
        .as_ref()
        .map(|spec| spec.selector.clone())
        .unwrap_or_default();

    let selector =
        Selector::try_from(label_selector).map_err(|source| ImageError::InvalidSelector {
            name: name.to_string(),
            source,
        })?;
    if selector.selects_all() {
        return Err(ImageError::Validation(format!(
            "deployment {} has an empty label selector",
            name
        )));
    }
    Ok(selector)
}

fn emit<W: Write>(out: &mut W, line: &str) -> std::io::Result<()> {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    writeln!(out, "[{}] {}", stamp, line)
}
