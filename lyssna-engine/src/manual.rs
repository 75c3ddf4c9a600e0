//! Single-channel dispatch (manual hook mode).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, info};

use lyssna_core::DetectionEvent;

use crate::{EngineError, LaunchContext, RunOutcome};

/// Binds exactly one input source and runs exactly one worker to
/// completion.
///
/// Blocking from the caller's perspective: control returns only once the
/// worker reached a terminal state. Driver resolution happens up front, so
/// an unusable driver or source never produces a worker.
pub async fn run_manual(ctx: &LaunchContext) -> Result<RunOutcome, EngineError> {
    let source = ctx.source.clone().ok_or(EngineError::MissingSource)?;
    let input = lyssna_input::create_input(&ctx.driver, &source, &ctx.config.input)?;
    info!(driver = %ctx.driver, source = %source, "starting single-channel run");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let stop = Arc::new(AtomicBool::new(false));
    let worker = task::spawn_blocking({
        let config = Arc::clone(&ctx.config);
        let job = Arc::clone(&ctx.job);
        let action = ctx.action;
        let stop = Arc::clone(&stop);
        move || lyssna_detection::run_worker(action, input, config, job, tx, stop)
    });

    // The sender lives inside the worker; the channel drains dry exactly
    // when the worker is done.
    let mut outcome = RunOutcome::Exhausted;
    while let Some(event) = rx.recv().await {
        match event {
            DetectionEvent::MatchFound {
                source,
                elapsed_secs,
            } => {
                debug!(source = %source, elapsed_secs, "match reported");
                outcome = RunOutcome::Match { elapsed_secs };
            }
            DetectionEvent::StreamExhausted { source } => {
                info!(source = %source, "stream exhausted");
            }
            DetectionEvent::WorkerFailed { .. } => {
                // The worker returns the same failure; surfaced below.
            }
        }
    }

    worker.await??;
    Ok(outcome)
}
