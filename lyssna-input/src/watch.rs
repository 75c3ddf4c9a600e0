//! Channel discovery for automatic hook mode.

use crate::InputError;

/// One change in the set of available channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A new channel or file became available under this name.
    Appeared(String),
    /// A previously seen channel went away.
    Disappeared(String),
}

/// Driver-specific channel discovery, polled by the automatic monitor.
///
/// `poll` is expected to be cheap; the monitor calls it on its own interval
/// and reacts to the returned diff.
pub trait ChannelWatcher: Send {
    fn poll(&mut self) -> Result<Vec<ChannelEvent>, InputError>;
}

impl std::fmt::Debug for dyn ChannelWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelWatcher").finish()
    }
}
