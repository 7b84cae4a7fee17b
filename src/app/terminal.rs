//! Terminal capability detection and log subscriber setup.

use std::io::{self, IsTerminal};

/// What the attached terminal supports for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TerminalProfile {
    pub(crate) color: bool,
    pub(crate) spinner: bool,
}

impl TerminalProfile {
    /// Probes env vars and stderr.
    pub(crate) fn detect(no_color_flag: bool, quiet: bool) -> Self {
        let dumb = is_dumb_terminal();
        Self::from_signals(
            no_color_flag || no_color_env_requested(),
            dumb,
            io::stderr().is_terminal(),
            quiet,
        )
    }

    fn from_signals(no_color: bool, dumb: bool, stderr_tty: bool, quiet: bool) -> Self {
        Self {
            color: !(no_color || dumb),
            spinner: stderr_tty && !quiet && !dumb,
        }
    }
}

fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

fn is_dumb_terminal() -> bool {
    std::env::var("TERM").is_ok_and(|value| value.eq_ignore_ascii_case("dumb"))
}

/// Installs the stderr `fmt` subscriber. `RUST_LOG` is honored unless `force_level`.
pub(crate) fn init_tracing(default_level: &str, force_level: bool, color: bool) {
    let filter = if force_level {
        tracing_subscriber::EnvFilter::new(default_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
