//! Rolling fingerprint comparison.

use std::collections::VecDeque;

use lyssna_config::DetectionConfig;

/// Compares the tail of the window-value stream against a captured
/// fingerprint. A value matches its reference when the absolute difference
/// stays within `tolerance` scaled by the reference (or by the silence
/// floor for near-zero references).
#[derive(Debug)]
pub struct FingerprintMatcher {
    fingerprint: Vec<f64>,
    tail: VecDeque<f64>,
    tolerance: f64,
    silence_floor: f64,
}

impl FingerprintMatcher {
    pub fn new(fingerprint: Vec<f64>, config: &DetectionConfig) -> Self {
        let capacity = fingerprint.len();
        Self {
            fingerprint,
            tail: VecDeque::with_capacity(capacity),
            tolerance: config.tolerance,
            silence_floor: config.silence_floor,
        }
    }

    /// Number of windows the fingerprint spans.
    pub fn len(&self) -> usize {
        self.fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprint.is_empty()
    }

    /// Pushes one window value; true once the whole tail matches.
    pub fn push(&mut self, value: f64) -> bool {
        self.tail.push_back(value);
        if self.tail.len() > self.fingerprint.len() {
            self.tail.pop_front();
        }
        self.tail.len() == self.fingerprint.len()
            && self
                .tail
                .iter()
                .zip(&self.fingerprint)
                .all(|(v, f)| self.in_tolerance(*v, *f))
    }

    fn in_tolerance(&self, value: f64, reference: f64) -> bool {
        (value - reference).abs() <= self.tolerance * reference.abs().max(self.silence_floor)
    }
}
