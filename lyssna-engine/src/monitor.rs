//! Automatic channel monitor: a supervisor owning a dynamic worker set.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tokio::time;
use tracing::{debug, info, warn};

use lyssna_core::DetectionEvent;
use lyssna_detection::DetectError;
use lyssna_input::ChannelEvent;

use crate::{EngineError, LaunchContext, RunOutcome};

struct WorkerHandle {
    stop: Arc<AtomicBool>,
    // Held for ownership; workers are retired through the stop flag, never
    // joined while the monitor runs.
    _handle: JoinHandle<Result<(), DetectError>>,
}

/// Watches the driver for channels and keeps one independent worker per
/// live channel, all sharing the same read-only config and job.
///
/// Returns on the first match (stopping every other worker) or a fatal
/// driver error; with neither it runs for the remaining life of the
/// process. A channel that fails to open, fails mid-stream, or disappears
/// retires only its own worker.
pub async fn run_monitor(ctx: &LaunchContext) -> Result<RunOutcome, EngineError> {
    let mut watcher =
        lyssna_input::create_watcher(&ctx.driver, ctx.source.as_deref(), &ctx.config.input)?;
    info!(
        driver = %ctx.driver,
        pattern = ctx.source.as_deref().unwrap_or("<any>"),
        "starting automatic channel monitor"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut workers: HashMap<String, WorkerHandle> = HashMap::new();
    let mut ticker = time::interval(Duration::from_millis(ctx.config.input.poll_interval_ms));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for event in watcher.poll()? {
                    match event {
                        ChannelEvent::Appeared(name) => {
                            if workers.contains_key(&name) {
                                continue;
                            }
                            match spawn_worker(ctx, &name, tx.clone()) {
                                Ok(handle) => {
                                    info!(channel = %name, "worker attached");
                                    workers.insert(name, handle);
                                }
                                Err(e) => {
                                    warn!(channel = %name, error = %e, "skipping channel");
                                }
                            }
                        }
                        ChannelEvent::Disappeared(name) => {
                            if let Some(worker) = workers.remove(&name) {
                                info!(channel = %name, "channel disappeared, retiring worker");
                                worker.stop.store(true, Ordering::Relaxed);
                            }
                        }
                    }
                }
            }
            Some(event) = rx.recv() => {
                match event {
                    DetectionEvent::MatchFound { source, elapsed_secs } => {
                        info!(source = %source, elapsed_secs, "first match wins, stopping all workers");
                        for worker in workers.values() {
                            worker.stop.store(true, Ordering::Relaxed);
                        }
                        return Ok(RunOutcome::Match { elapsed_secs });
                    }
                    DetectionEvent::StreamExhausted { source } => {
                        debug!(source = %source, "worker retired after exhaustion");
                        workers.remove(&source);
                    }
                    DetectionEvent::WorkerFailed { source, reason } => {
                        warn!(source = %source, reason = %reason, "worker failed, retiring channel");
                        workers.remove(&source);
                    }
                }
            }
        }
    }
}

fn spawn_worker(
    ctx: &LaunchContext,
    channel: &str,
    events: mpsc::UnboundedSender<DetectionEvent>,
) -> Result<WorkerHandle, EngineError> {
    let input = lyssna_input::create_input(&ctx.driver, channel, &ctx.config.input)?;
    let stop = Arc::new(AtomicBool::new(false));
    let handle = task::spawn_blocking({
        let config = Arc::clone(&ctx.config);
        let job = Arc::clone(&ctx.job);
        let action = ctx.action;
        let stop = Arc::clone(&stop);
        move || lyssna_detection::run_worker(action, input, config, job, events, stop)
    });
    Ok(WorkerHandle {
        stop,
        _handle: handle,
    })
}
