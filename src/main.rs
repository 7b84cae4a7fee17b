//! CLI entry point for oshima.

use std::process::ExitCode;

mod app;
mod app_config;
mod cli;
mod commands;
mod output;

/// Process outcome, mapped to the exit codes documented in `--help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Partial,
    Failure,
}

impl ProcessExit {
    fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match app::runtime::run_oshima().await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}
