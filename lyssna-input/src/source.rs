//! The capability every driver provides.

use crate::InputError;

/// A mono audio sample stream bound to one named channel or file.
///
/// Each source is exclusively owned by the worker it is bound to; nothing
/// here is shared.
pub trait InputSource: Send {
    /// The channel or file this source is bound to.
    fn name(&self) -> &str;

    /// Stream sample rate in frames per second.
    fn sample_rate(&self) -> u32;

    /// Reads up to `buf.len()` mono samples, returning how many were
    /// written. `Ok(0)` means the stream is exhausted.
    fn read_chunk(&mut self, buf: &mut [f32]) -> Result<usize, InputError>;
}

impl std::fmt::Debug for dyn InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSource")
            .field("name", &self.name())
            .finish()
    }
}
