//! CLI output formatting and display helpers.

use anyhow::Result;
use oshima_core::Recommendation;
use oshima_core::recommend::Submission;
use serde_json::json;

/// Message when no input was provided at all.
pub const NO_INPUT_GUIDANCE: &str =
    "No input provided. Pass text containing DOIs, pipe it via stdin, or add --file.";

/// Message when stdin was piped but empty.
pub const EMPTY_STDIN_GUIDANCE: &str =
    "Received empty stdin input. Pipe text containing DOIs, or pass it as arguments.";

/// Example for piping input.
pub const INPUT_PIPE_EXAMPLE: &str = "Example: echo 'doi:10.1000/182' | oshima extract";

/// Example for passing a bibliography file.
pub const INPUT_FILE_EXAMPLE: &str = "Example: oshima recommend --file library.bib";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Returns lines for quick-start guidance (headline + examples), truncated to width.
pub fn quick_start_guidance_lines(empty_stdin: bool, width: usize) -> Vec<String> {
    let headline = if empty_stdin {
        EMPTY_STDIN_GUIDANCE
    } else {
        NO_INPUT_GUIDANCE
    };
    [headline, INPUT_PIPE_EXAMPLE, INPUT_FILE_EXAMPLE]
        .iter()
        .map(|line| truncate_to_width(line, width))
        .collect()
}

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance(empty_stdin: bool) {
    let width = terminal_width().min(80);
    for line in quick_start_guidance_lines(empty_stdin, width) {
        println!("{line}");
    }
}

/// Renders identifiers one per line, or as a JSON array.
pub fn render_identifiers(identifiers: &[String], as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(identifiers)?);
    }
    Ok(identifiers.join("\n"))
}

/// Renders one recommendation as a numbered block.
pub fn format_recommendation(position: usize, rec: &Recommendation, width: usize) -> String {
    let mut heading = format!("{position}. {}", rec.display_title());
    if let Some(year) = rec.year {
        heading.push_str(&format!(" ({year})"));
    }

    let mut lines = vec![truncate_to_width(&heading, width)];
    let indent = "   ";
    let body_width = width.saturating_sub(indent.len());

    if let Some(authors) = &rec.authors {
        lines.push(format!("{indent}{}", truncate_to_width(authors, body_width)));
    }
    let venue = match &rec.journal {
        Some(journal) if !journal.is_empty() => format!("{journal} | score {:.3}", rec.score),
        _ => format!("score {:.3}", rec.score),
    };
    lines.push(format!("{indent}{}", truncate_to_width(&venue, body_width)));
    if let Some(link) = rec.doi_url() {
        lines.push(format!("{indent}{link}"));
    }
    if let Some(abstract_text) = rec.abstract_text.as_deref().map(str::trim)
        && !abstract_text.is_empty()
    {
        let single_line = abstract_text.split_whitespace().collect::<Vec<_>>().join(" ");
        lines.push(format!("{indent}{}", truncate_to_width(&single_line, body_width)));
    }
    lines.join("\n")
}

/// Renders a full submission result.
pub fn render_submission(submission: &Submission, as_json: bool, width: usize) -> Result<String> {
    if as_json {
        let value = json!({
            "queries": submission.queries,
            "recommendations": submission.recommendations,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    if submission.recommendations.is_empty() {
        return Ok(format!(
            "No recommendations returned for {} DOI(s).",
            submission.queries.len()
        ));
    }

    Ok(submission
        .recommendations
        .iter()
        .enumerate()
        .map(|(index, rec)| format_recommendation(index + 1, rec, width))
        .collect::<Vec<_>>()
        .join("\n\n"))
}
