//! Assembly of pasted text from arguments and/or stdin, and loading of all
//! inputs into a [`SourceAggregator`].

use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use oshima_core::ingest::DEFAULT_INGEST_CONCURRENCY;
use oshima_core::{IngestSummary, SharedAggregator, SourceAggregator, extract_report, ingest_files};
use tracing::{debug, info, warn};

use crate::cli::InputArgs;

/// Pasted text for this run, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PastedInput {
    pub(crate) text: Option<String>,
    pub(crate) piped_stdin_was_empty: bool,
}

/// Positional text wins; stdin is read only when no text was given and it is piped.
pub(crate) fn read_pasted_input(args: &InputArgs) -> Result<PastedInput> {
    if !args.text.is_empty() {
        return Ok(PastedInput {
            text: Some(args.text.join("\n")),
            piped_stdin_was_empty: false,
        });
    }

    if io::stdin().is_terminal() {
        return Ok(PastedInput::default());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    if buffer.trim().is_empty() {
        Ok(PastedInput {
            text: None,
            piped_stdin_was_empty: true,
        })
    } else {
        Ok(PastedInput {
            text: Some(buffer),
            piped_stdin_was_empty: false,
        })
    }
}

/// All sources gathered for one run.
#[derive(Debug)]
pub(crate) struct GatheredInput {
    pub(crate) sources: SourceAggregator,
    pub(crate) ingest: IngestSummary,
    pub(crate) had_pasted_text: bool,
}

impl GatheredInput {
    pub(crate) fn accepted_inputs(&self) -> usize {
        usize::from(self.had_pasted_text) + self.ingest.accepted.len()
    }

    pub(crate) fn failed_inputs(&self) -> usize {
        self.ingest.failed.len()
    }
}

/// Extracts the pasted text, then ingests every `--file` path.
pub(crate) async fn gather_sources(args: &InputArgs, pasted: Option<&str>) -> GatheredInput {
    let shared = SharedAggregator::new();

    if let Some(text) = pasted {
        let report = extract_report(text);
        for skipped in &report.skipped {
            warn!(token = %skipped.token, "Skipped DOI with malformed encoding");
            debug!(error = %skipped.error, "Decode failure detail");
        }
        info!(
            dois = report.identifiers.len(),
            duplicates = report.duplicates,
            "Parsed pasted text"
        );
        shared.set_pasted_source(report.identifiers);
    }

    let ingest = if args.files.is_empty() {
        IngestSummary::default()
    } else {
        ingest_files(&shared, &args.files, DEFAULT_INGEST_CONCURRENCY).await
    };

    GatheredInput {
        sources: shared.snapshot(),
        ingest,
        had_pasted_text: pasted.is_some(),
    }
}
