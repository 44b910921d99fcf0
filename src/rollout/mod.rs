//! Rollout completion detection
//!
//! After an image update the deployment controller replaces old pods with
//! new ones. This module polls the deployment and its pods until the
//! rollout converges, the overall deadline passes, or an API call fails.
//!
//! - `snapshot` turns API objects into a [`RolloutSnapshot`](crate::models::RolloutSnapshot)
//! - `tracker` is the per-poll state machine, free of I/O and clocks
//! - `monitor` drives the tracker on a fixed interval against a deadline

mod monitor;
mod snapshot;
mod tracker;

pub use monitor::{RolloutMonitor, RolloutSettings};
pub use snapshot::{snapshot_from, summarize_pod};
pub use tracker::{RolloutOutcome, RolloutTracker, Verdict, format_duration};
