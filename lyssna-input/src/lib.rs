//! # lyssna-input
//!
//! The input-source abstraction: drivers that turn a named channel or file
//! into a mono sample stream, plus channel discovery for automatic hook
//! mode. The `file` driver is always compiled in; the `jack` driver lives
//! behind the `jack` cargo feature.

mod error;
mod file;
#[cfg(feature = "jack")]
mod jack_channel;
mod source;
mod watch;

pub use error::InputError;
pub use file::{FileInput, FileWatcher};
#[cfg(feature = "jack")]
pub use jack_channel::{JackInput, JackWatcher};
pub use source::InputSource;
pub use watch::{ChannelEvent, ChannelWatcher};

use lyssna_config::InputConfig;

/// Driver names compiled into this build, in enumeration order.
pub fn available_drivers() -> Vec<&'static str> {
    let mut drivers = vec!["file"];
    #[cfg(feature = "jack")]
    drivers.push("jack");
    drivers
}

/// Builds the input source for one named channel or file.
///
/// Driver names are matched exactly; a name that is unknown or not compiled
/// into this build is an error, never a silently unusable source.
pub fn create_input(
    driver: &str,
    source: &str,
    _config: &InputConfig,
) -> Result<Box<dyn InputSource>, InputError> {
    match driver {
        "file" => Ok(Box::new(FileInput::open(source)?)),
        #[cfg(feature = "jack")]
        "jack" => Ok(Box::new(JackInput::connect(source, _config)?)),
        other => Err(InputError::UnsupportedDriver(other.to_string())),
    }
}

/// Builds the channel watcher automatic mode polls for appearing sources.
///
/// For the `file` driver the pattern names the directory to watch (current
/// directory when omitted); for `jack` it is an optional port-name filter.
pub fn create_watcher(
    driver: &str,
    pattern: Option<&str>,
    _config: &InputConfig,
) -> Result<Box<dyn ChannelWatcher>, InputError> {
    match driver {
        "file" => Ok(Box::new(FileWatcher::new(pattern.unwrap_or("."))?)),
        #[cfg(feature = "jack")]
        "jack" => Ok(Box::new(JackWatcher::connect(pattern)?)),
        other => Err(InputError::UnsupportedDriver(other.to_string())),
    }
}
