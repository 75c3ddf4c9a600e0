//! # lyssna-core
//!
//! Shared vocabulary for the lyssna toolkit: the operator-selected action,
//! the channel hook mode, the per-action job handed to detection workers,
//! and the event protocol workers report through.

pub mod action;
pub mod events;
pub mod job;

pub use action::{Action, HookMode};
pub use events::DetectionEvent;
pub use job::{DetectJob, JobError};
