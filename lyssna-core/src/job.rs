//! Per-action work descriptions handed to detection workers.

use thiserror::Error;

/// Error constructing a job from operator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("captured fingerprint is empty")]
    EmptyFingerprint,

    #[error("captured fingerprint has {got} values, need at least {min}")]
    FingerprintTooShort { got: usize, min: usize },
}

/// Action-specific payload shared read-only by every worker of a run.
///
/// One variant per action that reaches a worker, so consumers are checked
/// exhaustively instead of switching on a runtime tag.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectJob {
    /// Dump carries no payload; workers emit fingerprint values as they go.
    Dump,
    /// Capture carries the fingerprint the stream is scanned for.
    Capture { fingerprint: Vec<f64> },
}

impl DetectJob {
    /// Builds a capture job, rejecting fingerprints too short to match
    /// against anything meaningful.
    pub fn capture(fingerprint: Vec<f64>, min_windows: usize) -> Result<Self, JobError> {
        if fingerprint.is_empty() {
            return Err(JobError::EmptyFingerprint);
        }
        if fingerprint.len() < min_windows {
            return Err(JobError::FingerprintTooShort {
                got: fingerprint.len(),
                min: min_windows,
            });
        }
        Ok(DetectJob::Capture { fingerprint })
    }
}
