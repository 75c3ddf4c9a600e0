//! ## lyssna-cli
//! **Operator entrypoint for the lyssna toolkit**
//!
//! Parses and validates the launch options, loads the configuration, builds
//! the per-action job, and hands control to one of the two dispatch modes.
//! Exit codes: 0 for success (including a capture match), 1 for runtime
//! failures, 2 for usage errors.

use std::process::exit;
use std::sync::Arc;

use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing::info;

use lyssna_config::LyssnaConfig;
use lyssna_core::HookMode;
use lyssna_engine::{build_job, run_manual, run_monitor, LaunchContext, RunOutcome};

mod options;

use options::{Cli, LaunchOptions, Validated};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let validated = match cli.validate() {
        Ok(validated) => validated,
        Err(usage) => {
            // Print the violated precondition plus usage, exit 2.
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::MissingRequiredArgument, usage.to_string())
                .exit();
        }
    };

    match validated {
        Validated::ShowDrivers => {
            println!(
                "Possible drivers: {}",
                lyssna_input::available_drivers().join(" ")
            );
            Ok(())
        }
        Validated::Launch(opts) => run(opts).await,
    }
}

async fn run(opts: LaunchOptions) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    lyssna_telemetry::logging::init(opts.log_filter);
    info!(action = ?opts.action, driver = %opts.driver, "lyssna starting");

    let config = Arc::new(LyssnaConfig::load_from_path(&opts.config_path)?);
    let job = Arc::new(build_job(
        opts.action,
        opts.sample_path.as_deref(),
        &config,
    )?);

    let ctx = LaunchContext {
        action: opts.action,
        driver: opts.driver,
        source: opts.source,
        config,
        job,
    };

    let outcome = match opts.hook_mode {
        HookMode::Manual => run_manual(&ctx).await?,
        HookMode::Automatic => run_monitor(&ctx).await?,
    };

    match outcome {
        RunOutcome::Match { elapsed_secs } => {
            println!("{}", match_report(elapsed_secs));
            // First match ends the whole process, whatever else is running.
            exit(0);
        }
        RunOutcome::Exhausted => {
            info!("run complete, no match");
            Ok(())
        }
    }
}

/// The one line the toolkit prints when a capture succeeds.
fn match_report(elapsed_secs: f64) -> String {
    format!("FOUND, processed {elapsed_secs:.6} sec")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_report_has_six_fractional_digits() {
        assert_eq!(match_report(3.5), "FOUND, processed 3.500000 sec");
        assert_eq!(match_report(1.234567), "FOUND, processed 1.234567 sec");
        assert_eq!(match_report(0.0), "FOUND, processed 0.000000 sec");
    }
}
