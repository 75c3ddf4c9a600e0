//! Action and hook-mode vocabulary.

/// What a launched run does with its streams.
///
/// Validation produces exactly one of these; there is no unset state to
/// carry past the option parser. Driver listing never becomes an `Action`,
/// it is answered during validation before a run exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Produce a fingerprint from a sample stream.
    Dump,
    /// Scan a stream for a previously produced fingerprint.
    Capture,
}

/// How input channels are bound to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookMode {
    /// The operator names exactly one channel or file.
    #[default]
    Manual,
    /// The monitor discovers channels itself and hooks every one.
    Automatic,
}
