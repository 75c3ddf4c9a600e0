//! Input-driver error conditions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// The driver name is not in the compiled-in set.
    #[error("unsupported input driver: {0}")]
    UnsupportedDriver(String),

    /// The named channel, file, or watch directory does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// The stream header declares a sample layout outside the readable range.
    #[error("unsupported sample layout: {0}")]
    UnsupportedFormat(String),

    /// The stream is not decodable audio.
    #[error("audio decode error: {0}")]
    Decode(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "jack")]
    #[error("jack error: {0}")]
    Jack(#[from] jack::Error),
}
