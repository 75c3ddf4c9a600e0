//! Window-energy reduction of a sample stream.

/// Accumulates mono samples and emits one RMS value per fixed-length
/// window. Windows do not overlap; a trailing partial window is only
/// reachable through [`WindowAccumulator::flush`].
#[derive(Debug)]
pub struct WindowAccumulator {
    window_len: usize,
    sum_squares: f64,
    filled: usize,
}

impl WindowAccumulator {
    /// `window_len` is clamped to at least one frame.
    pub fn new(window_len: usize) -> Self {
        Self {
            window_len: window_len.max(1),
            sum_squares: 0.0,
            filled: 0,
        }
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Feeds samples, invoking `emit` with the RMS of every window that
    /// completes inside this batch.
    pub fn feed<F: FnMut(f64)>(&mut self, samples: &[f32], mut emit: F) {
        for &s in samples {
            let s = f64::from(s);
            self.sum_squares += s * s;
            self.filled += 1;
            if self.filled == self.window_len {
                emit((self.sum_squares / self.window_len as f64).sqrt());
                self.sum_squares = 0.0;
                self.filled = 0;
            }
        }
    }

    /// RMS of a trailing partial window, if any samples are buffered.
    pub fn flush(&mut self) -> Option<f64> {
        if self.filled == 0 {
            return None;
        }
        let rms = (self.sum_squares / self.filled as f64).sqrt();
        self.sum_squares = 0.0;
        self.filled = 0;
        Some(rms)
    }
}
