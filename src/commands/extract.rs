//! `extract`: print the deduplicated DOIs found in the inputs.

use anyhow::Result;
use tracing::info;

use crate::ProcessExit;
use crate::app::exit_handler::determine_exit_outcome;
use crate::app::input_processor::{GatheredInput, PastedInput, gather_sources};
use crate::cli::InputArgs;
use crate::output;

pub(crate) async fn run_extract_command(
    args: &InputArgs,
    pasted: PastedInput,
) -> Result<ProcessExit> {
    if pasted.text.is_none() && args.files.is_empty() {
        output::print_quick_start_guidance(pasted.piped_stdin_was_empty);
        return Ok(ProcessExit::Success);
    }

    let gathered = gather_sources(args, pasted.text.as_deref()).await;
    let identifiers = selected_identifiers(&gathered, args.limit);

    if identifiers.is_empty() {
        info!("No DOIs found in input");
    }
    if !identifiers.is_empty() || args.json {
        println!("{}", output::render_identifiers(&identifiers, args.json)?);
    }

    Ok(determine_exit_outcome(
        gathered.accepted_inputs(),
        gathered.failed_inputs(),
    ))
}

fn selected_identifiers(gathered: &GatheredInput, limit: Option<u16>) -> Vec<String> {
    match limit {
        Some(limit) => gathered.sources.get_aggregate_capped(usize::from(limit)),
        None => gathered.sources.get_aggregate(),
    }
}
