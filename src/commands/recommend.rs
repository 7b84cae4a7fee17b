//! `recommend`: submit the capped aggregate and print what the service suggests.

use anyhow::{Context, Result};
use oshima_core::{HttpRecommender, RecommendError, submit};
use tracing::{info, warn};

use crate::ProcessExit;
use crate::app::config_runtime::RecommendSettings;
use crate::app::exit_handler::determine_exit_outcome;
use crate::app::input_processor::{PastedInput, gather_sources};
use crate::app::progress_manager;
use crate::cli::InputArgs;
use crate::output;

pub(crate) async fn run_recommend_command(
    args: &InputArgs,
    pasted: PastedInput,
    settings: &RecommendSettings,
    use_spinner: bool,
) -> Result<ProcessExit> {
    if pasted.text.is_none() && args.files.is_empty() {
        output::print_quick_start_guidance(pasted.piped_stdin_was_empty);
        return Ok(ProcessExit::Success);
    }

    let gathered = gather_sources(args, pasted.text.as_deref()).await;
    if gathered.sources.get_aggregate().is_empty() {
        return Err(RecommendError::EmptyQuery.into());
    }

    let recommender = HttpRecommender::new(&settings.client)?;
    info!(
        endpoint = %recommender.endpoint(),
        limit = settings.query_limit,
        "Requesting recommendations"
    );

    let sending = gathered
        .sources
        .get_aggregate()
        .len()
        .min(settings.query_limit);
    let spinner = progress_manager::start_spinner(
        use_spinner,
        format!("Fetching recommendations for {sending} DOI(s)..."),
    );
    let result = submit(&gathered.sources, &recommender, settings.query_limit).await;
    progress_manager::finish_spinner(spinner);

    let submission = result
        .inspect_err(|error| {
            if error.is_retryable() {
                warn!("Request can be retried; your DOI list is unchanged");
            }
        })
        .context("Recommendation request failed")?;

    let width = output::terminal_width();
    println!(
        "{}",
        output::render_submission(&submission, args.json, width)?
    );

    Ok(determine_exit_outcome(
        gathered.accepted_inputs(),
        gathered.failed_inputs(),
    ))
}
