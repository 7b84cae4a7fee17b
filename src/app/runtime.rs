use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::app::config_runtime;
use crate::app::input_processor;
use crate::app::terminal::{self, TerminalProfile};
use crate::app_config;
use crate::cli::{Cli, Command, ConfigCommand};
use crate::{ProcessExit, commands, output};

pub(crate) async fn run_oshima() -> Result<ProcessExit> {
    // Parse first so --help works without logs.
    let cli = Cli::parse();

    // A broken config file is reported after logging is up.
    let loaded = app_config::load_default_file_config();
    let file_config = loaded.as_ref().ok().and_then(|l| l.config.as_ref());

    let verbosity = config_runtime::resolve_verbosity(&cli, file_config);
    let quiet = verbosity == app_config::VerbositySetting::Quiet;
    let profile = TerminalProfile::detect(cli.no_color, quiet);
    terminal::init_tracing(
        config_runtime::resolve_default_log_level(verbosity),
        config_runtime::should_force_cli_log_level(&cli),
        profile.color,
    );
    debug!(?cli, "CLI arguments parsed");

    let loaded = loaded?;
    let file_config = loaded.config.as_ref();

    let Some(command) = &cli.command else {
        output::print_quick_start_guidance(false);
        return Ok(ProcessExit::Success);
    };

    match command {
        Command::Extract(args) => {
            let pasted = input_processor::read_pasted_input(args)?;
            commands::run_extract_command(args, pasted).await
        }
        Command::Recommend(args) => {
            let settings = config_runtime::resolve_recommend_settings(
                args,
                config_runtime::api_url_from_env(),
                file_config,
            )?;
            let pasted = input_processor::read_pasted_input(&args.input)?;
            commands::run_recommend_command(&args.input, pasted, &settings, profile.spinner).await
        }
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                commands::run_config_show_command(&loaded, verbosity)?;
                Ok(ProcessExit::Success)
            }
        },
    }
}
