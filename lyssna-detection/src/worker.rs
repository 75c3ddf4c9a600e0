//! One detection worker: the blocking loop bound to a single input source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use lyssna_config::LyssnaConfig;
use lyssna_core::{Action, DetectJob, DetectionEvent};
use lyssna_input::InputSource;

use crate::error::DetectError;
use crate::matcher::FingerprintMatcher;
use crate::window::WindowAccumulator;

/// Runs one worker to its terminal state.
///
/// Blocking; the caller decides which thread it occupies. The terminal
/// state is posted on `events` before returning: a capture match, stream
/// exhaustion, or a mid-stream failure. A set `stop` flag retires the
/// worker quietly without an event.
pub fn run_worker(
    action: Action,
    mut input: Box<dyn InputSource>,
    config: Arc<LyssnaConfig>,
    job: Arc<DetectJob>,
    events: UnboundedSender<DetectionEvent>,
    stop: Arc<AtomicBool>,
) -> Result<(), DetectError> {
    let source = input.name().to_string();
    let rate = input.sample_rate();
    if rate == 0 {
        let reason = "source reports a zero sample rate".to_string();
        let _ = events.send(DetectionEvent::WorkerFailed {
            source,
            reason: reason.clone(),
        });
        return Err(DetectError::BadStream(reason));
    }

    let window_len = (u64::from(rate) * config.detection.window_ms / 1000).max(1) as usize;
    let mut windows = WindowAccumulator::new(window_len);
    let mut matcher = match job.as_ref() {
        DetectJob::Capture { fingerprint } => Some(FingerprintMatcher::new(
            fingerprint.clone(),
            &config.detection,
        )),
        DetectJob::Dump => None,
    };

    debug!(source = %source, ?action, rate, window_len, "worker started");

    let mut buf = vec![0.0f32; config.input.chunk_frames];
    let mut windows_done: u64 = 0;
    let mut window_values = Vec::new();
    let mut matched_at: Option<f64> = None;

    'stream: loop {
        if stop.load(Ordering::Relaxed) {
            debug!(source = %source, "worker stopped by its supervisor");
            return Ok(());
        }

        let read = match input.read_chunk(&mut buf) {
            Ok(0) => break 'stream,
            Ok(n) => n,
            Err(e) => {
                warn!(source = %source, error = %e, "stream failure");
                let _ = events.send(DetectionEvent::WorkerFailed {
                    source,
                    reason: e.to_string(),
                });
                return Err(DetectError::Input(e));
            }
        };

        window_values.clear();
        windows.feed(&buf[..read], |v| window_values.push(v));

        for &value in &window_values {
            windows_done += 1;
            match &mut matcher {
                // Dump emits the fingerprint value stream on stdout, one
                // value per line, the format the capture loader reads back.
                None => println!("{value:.6}"),
                Some(m) => {
                    if m.push(value) {
                        let elapsed = (windows_done * window_len as u64) as f64 / f64::from(rate);
                        matched_at = Some(elapsed);
                        break 'stream;
                    }
                }
            }
        }
    }

    if let Some(elapsed_secs) = matched_at {
        info!(source = %source, elapsed_secs, "fingerprint matched");
        let _ = events.send(DetectionEvent::MatchFound {
            source,
            elapsed_secs,
        });
        return Ok(());
    }

    // A trailing partial window still counts for a dump.
    if matcher.is_none() {
        if let Some(value) = windows.flush() {
            println!("{value:.6}");
        }
    }

    debug!(source = %source, windows = windows_done, "stream exhausted");
    let _ = events.send(DetectionEvent::StreamExhausted { source });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyssna_input::InputError;
    use tokio::sync::mpsc;

    struct StubSource {
        rate: u32,
        samples: Vec<f32>,
        pos: usize,
    }

    impl StubSource {
        fn windows(rate: u32, windows: &[(f32, usize)]) -> Self {
            let mut samples = Vec::new();
            for &(amplitude, count) in windows {
                samples.extend(std::iter::repeat(amplitude).take(count));
            }
            Self {
                rate,
                samples,
                pos: 0,
            }
        }
    }

    impl InputSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        fn sample_rate(&self) -> u32 {
            self.rate
        }

        fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize, InputError> {
            let remaining = &self.samples[self.pos..];
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn test_config() -> Arc<LyssnaConfig> {
        // 100 ms windows at 1 kHz: one window per 100 frames.
        Arc::new(LyssnaConfig::default())
    }

    #[test]
    fn capture_reports_the_match_position() {
        let config = test_config();
        // Two silent windows, then three windows matching the fingerprint.
        let input = StubSource::windows(1000, &[(0.0, 200), (0.5, 300), (0.0, 200)]);
        let job = Arc::new(DetectJob::capture(vec![0.5, 0.5, 0.5], 3).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_worker(
            Action::Capture,
            Box::new(input),
            config,
            job,
            tx,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();

        match rx.try_recv().unwrap() {
            DetectionEvent::MatchFound {
                source,
                elapsed_secs,
            } => {
                assert_eq!(source, "stub");
                // Match concludes at the end of window five: 0.5 s in.
                assert!((elapsed_secs - 0.5).abs() < 1e-9);
            }
            other => panic!("expected a match, got {other:?}"),
        }
        // The worker returns right after the match; nothing else reported.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn capture_without_a_match_exhausts() {
        let config = test_config();
        let input = StubSource::windows(1000, &[(0.1, 400)]);
        let job = Arc::new(DetectJob::capture(vec![0.9, 0.9, 0.9], 3).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_worker(
            Action::Capture,
            Box::new(input),
            config,
            job,
            tx,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            DetectionEvent::StreamExhausted { .. }
        ));
    }

    #[test]
    fn dump_exhausts_without_match_events() {
        let config = test_config();
        let input = StubSource::windows(1000, &[(0.5, 250)]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_worker(
            Action::Dump,
            Box::new(input),
            config,
            Arc::new(DetectJob::Dump),
            tx,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            DetectionEvent::StreamExhausted { .. }
        ));
    }

    #[test]
    fn a_set_stop_flag_retires_the_worker_silently() {
        let config = test_config();
        let input = StubSource::windows(1000, &[(0.5, 1000)]);
        let job = Arc::new(DetectJob::capture(vec![0.5, 0.5, 0.5], 3).unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        run_worker(
            Action::Capture,
            Box::new(input),
            config,
            job,
            tx,
            Arc::new(AtomicBool::new(true)),
        )
        .unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn zero_sample_rate_fails_fast() {
        let config = test_config();
        let input = StubSource {
            rate: 0,
            samples: Vec::new(),
            pos: 0,
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = run_worker(
            Action::Capture,
            Box::new(input),
            config,
            Arc::new(DetectJob::capture(vec![0.5, 0.5, 0.5], 3).unwrap()),
            tx,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap_err();

        assert!(matches!(err, DetectError::BadStream(_)));
        assert!(matches!(
            rx.try_recv().unwrap(),
            DetectionEvent::WorkerFailed { .. }
        ));
    }
}
