//! # lyssna-engine
//!
//! Dual-mode dispatch and lifecycle control. The single-channel dispatcher
//! binds one source and runs one worker to completion; the automatic
//! channel monitor keeps one worker per discovered channel. Both share the
//! same read-only config and job, and both end the run on the first
//! reported match.

mod error;
mod job;
mod manual;
mod monitor;

pub use error::EngineError;
pub use job::build_job;
pub use manual::run_manual;
pub use monitor::run_monitor;

use std::sync::Arc;

use lyssna_config::LyssnaConfig;
use lyssna_core::{Action, DetectJob};

/// Everything a dispatch mode needs for one run: the action, the resolved
/// driver and source names, and the shared read-only config and job.
///
/// Built once after validation and never mutated.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub action: Action,
    pub driver: String,
    /// Manual mode: the bound channel/file. Automatic mode: an optional
    /// discovery pattern (watch directory, port filter).
    pub source: Option<String>,
    pub config: Arc<LyssnaConfig>,
    pub job: Arc<DetectJob>,
}

/// Terminal state of a dispatch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// A capture worker matched its fingerprint at this stream position.
    Match { elapsed_secs: f64 },
    /// Every bound stream ran out without a match.
    Exhausted,
}
