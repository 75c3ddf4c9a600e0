//! Worker-to-supervisor messages.
//!
//! A worker never terminates the process itself. It posts one of these on
//! its event channel and returns; the dispatcher that owns the worker set
//! decides what the event means for the rest of the run.

/// Terminal or fatal state reported by one detection worker.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionEvent {
    /// The stream matched the carried fingerprint at this position (seconds).
    MatchFound { source: String, elapsed_secs: f64 },
    /// The stream ran out without a match (or after a completed dump).
    StreamExhausted { source: String },
    /// The worker hit an I/O or decode failure mid-stream.
    WorkerFailed { source: String, reason: String },
}
