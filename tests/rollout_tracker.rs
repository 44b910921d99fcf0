//! Rollout tracker tests
//!
//! Drive the state machine with synthetic snapshots on a 5 second cadence,
//! without a cluster or a runtime clock.

use std::time::Duration;

use kubectl_image::models::{PodPhase, PodSummary};
use kubectl_image::rollout::RolloutOutcome;
use kubectl_image::{RolloutSnapshot, RolloutTracker, Verdict};
use tokio::time::Instant;

const POLL: Duration = Duration::from_secs(5);
const GRACE: Duration = Duration::from_secs(60);

fn snapshot(desired: i32, ready: i32, pending: usize, terminating: usize) -> RolloutSnapshot {
    let mut pods: Vec<PodSummary> = (0..ready)
        .map(|i| PodSummary::new(format!("new-{i}"), PodPhase::Running, true))
        .collect();
    pods.extend((0..pending).map(|i| PodSummary::new(format!("pending-{i}"), PodPhase::Pending, false)));
    pods.extend(
        (0..terminating).map(|i| PodSummary::new(format!("old-{i}"), PodPhase::Terminating, true)),
    );

    RolloutSnapshot {
        desired_replicas: desired,
        updated_replicas: ready,
        ready_replicas: ready,
        available_replicas: ready,
        observed_generation: 3,
        generation: 3,
        progressing_condition_true: false,
        pods,
    }
}

/// Feed snapshots one per tick, returning the tick and verdict that converged
fn run(snapshots: &[RolloutSnapshot]) -> (Vec<Verdict>, Option<(usize, RolloutOutcome)>) {
    let start = Instant::now();
    let mut tracker = RolloutTracker::new(start, GRACE);
    let mut verdicts = Vec::new();

    for (i, snap) in snapshots.iter().enumerate() {
        let tick = i + 1;
        let verdict = tracker.observe(snap, start + POLL * tick as u32);
        verdicts.push(verdict.clone());
        if let Some(outcome) = verdict.outcome() {
            return (verdicts, Some((tick, outcome)));
        }
    }
    (verdicts, None)
}

#[test]
fn test_converges_exactly_when_cleanup_finishes() {
    let mut snapshots = vec![snapshot(3, 1, 2, 0)];
    snapshots.extend((2..=14).map(|_| snapshot(3, 3, 0, 2)));
    snapshots.push(snapshot(3, 3, 0, 0));

    let (verdicts, converged) = run(&snapshots);

    let (tick, outcome) = converged.expect("rollout should converge");
    assert_eq!(tick, 15);
    assert!(matches!(outcome, RolloutOutcome::Complete { cleanup: Some(_), .. }));

    let ready_messages = verdicts
        .iter()
        .filter(|v| matches!(v, Verdict::NewPodsReady { .. }))
        .count();
    assert_eq!(ready_messages, 1);
    assert!(matches!(verdicts[1], Verdict::NewPodsReady { .. }));
    assert!(verdicts[2..14].iter().all(|v| *v == Verdict::AwaitingCleanup));
}

#[test]
fn test_slow_cleanup_never_blocks_convergence() {
    let snapshots: Vec<_> = (0..200).map(|_| snapshot(2, 2, 0, 1)).collect();

    let (_, converged) = run(&snapshots);

    let (tick, outcome) = converged.expect("rollout should converge despite old pods");
    // ready at tick 1 (5s); first tick more than 60s later is tick 14 (70s)
    assert_eq!(tick, 14);
    assert_eq!(
        outcome,
        RolloutOutcome::CleanupOverdue {
            total: Duration::from_secs(70),
            cleanup: Duration::from_secs(65),
        }
    );
}

#[test]
fn test_never_ready_never_converges() {
    // 600s worth of ticks with the deployment stuck at one ready replica
    let snapshots: Vec<_> = (0..120).map(|_| snapshot(3, 1, 2, 0)).collect();

    let (verdicts, converged) = run(&snapshots);

    assert!(converged.is_none());
    assert!(verdicts.iter().all(|v| matches!(v, Verdict::Progressing { .. })));
}

#[test]
fn test_condition_alone_marks_deployment_ready() {
    let mut snap = snapshot(2, 2, 0, 0);
    snap.updated_replicas = 1;
    assert!(!snap.deployment_ready());
    snap.progressing_condition_true = true;

    let (_, converged) = run(&[snap]);
    assert!(converged.is_some());
}
