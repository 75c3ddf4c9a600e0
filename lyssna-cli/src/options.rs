//! Option parsing and validation.
//!
//! Every precondition check lives here; downstream code receives a fully
//! validated, immutable [`LaunchOptions`] value and never re-checks flag
//! combinations.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;

use lyssna_core::{Action, HookMode};

/// Sound-pattern toolkit: fingerprint a sample, or capture that pattern in
/// live or stored audio streams.
#[derive(Debug, Parser)]
#[command(name = "lyssna", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Action to perform.
    #[arg(short = 'a', value_name = "ACTION", value_enum)]
    pub action: ActionArg,

    /// Config file holding detection thresholds and pattern lengths.
    #[arg(short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sample file with a previously captured fingerprint (capture only).
    #[arg(short = 's', value_name = "PATH")]
    pub sample: Option<PathBuf>,

    /// Input driver (see `-a showdrv` for the compiled-in set).
    #[arg(short = 'd', value_name = "DRIVER", default_value = "file")]
    pub driver: String,

    /// Hook every channel/file the driver discovers, instead of one source.
    #[arg(short = 'm')]
    pub monitor: bool,

    /// Raise log verbosity (stackable: -v, -vv, -vvv, -vvvv).
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet output: errors only, supersedes -v.
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Channel or file to bind (`-` for stdin); optional with -m.
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,
}

/// The `-a` flag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// Create a sample fingerprint.
    Dump,
    /// Capture a sound pattern in a stream.
    Capture,
    /// Show the compiled-in input drivers.
    Showdrv,
}

/// A precondition the flag combination violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("action is capture, but no sample file was given (-s)")]
    SampleFileMissing,

    #[error("config file not specified (-c)")]
    ConfigFileMissing,

    #[error("[channel/file]name not specified")]
    SourceMissing,
}

/// Fully validated launch description: the single source of dispatch truth.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub action: Action,
    pub config_path: PathBuf,
    pub sample_path: Option<PathBuf>,
    pub driver: String,
    pub source: Option<String>,
    pub hook_mode: HookMode,
    pub log_filter: &'static str,
}

/// Outcome of validation: either the short-circuiting driver listing, or a
/// full launch description.
#[derive(Debug)]
pub enum Validated {
    ShowDrivers,
    Launch(LaunchOptions),
}

impl Cli {
    /// Applies the conditional-mandatory rules, in their documented order.
    pub fn validate(self) -> Result<Validated, UsageError> {
        let action = match self.action {
            // showdrv short-circuits every other precondition and never
            // reaches the launch path.
            ActionArg::Showdrv => return Ok(Validated::ShowDrivers),
            ActionArg::Dump => Action::Dump,
            ActionArg::Capture => Action::Capture,
        };

        if action == Action::Capture && self.sample.is_none() {
            return Err(UsageError::SampleFileMissing);
        }

        let config_path = self.config.ok_or(UsageError::ConfigFileMissing)?;

        let hook_mode = if self.monitor {
            HookMode::Automatic
        } else {
            HookMode::Manual
        };

        if hook_mode == HookMode::Manual && self.source.is_none() {
            return Err(UsageError::SourceMissing);
        }

        Ok(Validated::Launch(LaunchOptions {
            action,
            config_path,
            sample_path: self.sample,
            driver: self.driver,
            source: self.source,
            hook_mode,
            log_filter: lyssna_telemetry::logging::level_filter(self.verbose, self.quiet),
        }))
    }
}
