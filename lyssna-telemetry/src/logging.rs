//! Tracing subscriber setup and the CLI verbosity mapping.

use tracing_subscriber::{fmt, EnvFilter};

/// Maps `-v` repetitions and `-q` onto a default filter directive.
///
/// `-q` wins over any number of `-v`s, whatever their order on the line.
pub fn level_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the process-wide subscriber once.
///
/// `RUST_LOG` overrides the CLI-derived default; a second call is a no-op
/// so tests can initialize freely.
pub fn init(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string())),
        )
        .with_thread_names(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn verbosity_maps_onto_levels() {
        assert_eq!(level_filter(0, false), "warn");
        assert_eq!(level_filter(1, false), "info");
        assert_eq!(level_filter(2, false), "debug");
        assert_eq!(level_filter(3, false), "trace");
        assert_eq!(level_filter(4, false), "trace");
    }

    #[test]
    fn quiet_supersedes_any_verbosity() {
        for verbose in 0..=4 {
            assert_eq!(level_filter(verbose, true), "error");
        }
    }

    #[traced_test]
    #[test]
    fn events_reach_the_subscriber() {
        tracing::info!("monitor attached");
        assert!(logs_contain("monitor attached"));
    }
}
