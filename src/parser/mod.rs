//! DOI extraction from unstructured text.
//!
//! This module turns raw text (pasted prose, DOI lists, whole BibTeX or RIS
//! files) into an ordered, de-duplicated list of normalized DOIs.
//!
//! # Pipeline
//!
//! 1. Split the text on whitespace, commas, and semicolons ([`tokenize`])
//! 2. Match each token against the DOI grammar ([`doi`] module docs)
//! 3. Strip the scheme prefix and percent-decode
//! 4. Keep the first occurrence of every identifier
//!
//! # Example
//!
//! ```
//! use oshima_core::parser::extract;
//!
//! let dois = extract("see https://doi.org/10.1000/182, doi:10.1038/nphys1170");
//! assert_eq!(dois, ["10.1000/182", "10.1038/nphys1170"]);
//! ```

mod doi;
mod error;
mod tokens;

pub use doi::{DoiMatch, match_token, normalize};
pub use error::ParseError;
pub use tokens::{is_delimiter, tokenize};

use std::collections::HashSet;
use tracing::{debug, info};

/// A token that matched the DOI grammar but could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedToken {
    /// The whitespace/comma/semicolon-delimited token
    pub token: String,
    /// Why it was dropped
    pub error: ParseError,
}

/// Full outcome of an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Normalized identifiers in first-occurrence order
    pub identifiers: Vec<String>,
    /// DOI-shaped tokens dropped during normalization
    pub skipped: Vec<SkippedToken>,
    /// Number of candidate tokens examined
    pub tokens_scanned: usize,
    /// Number of matches collapsed as duplicates
    pub duplicates: usize,
}

impl ExtractReport {
    /// Returns true if no identifiers were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns the number of identifiers found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }
}

/// Extracts normalized DOIs from raw text.
///
/// Never fails: tokens that do not match, or whose percent-encoding is
/// broken, are dropped. Empty or blank input yields an empty list.
///
/// # Example
///
/// ```
/// use oshima_core::parser::extract;
///
/// assert_eq!(extract("10.1000/a, 10.1000/b, 10.1000/a"), ["10.1000/a", "10.1000/b"]);
/// assert!(extract("   ").is_empty());
/// ```
#[must_use]
pub fn extract(text: &str) -> Vec<String> {
    extract_report(text).identifiers
}

/// Extracts normalized DOIs and reports what was dropped along the way.
///
/// Same identifiers as [`extract`]; additionally records tokens that matched
/// the grammar but failed to decode.
#[tracing::instrument(skip(text), fields(input_len = text.len()))]
#[must_use]
pub fn extract_report(text: &str) -> ExtractReport {
    let mut report = ExtractReport::default();

    if text.trim().is_empty() {
        debug!("Empty input provided");
        return report;
    }

    let mut seen: HashSet<String> = HashSet::new();
    for token in tokenize(text) {
        report.tokens_scanned += 1;

        let Some(found) = match_token(token) else {
            continue;
        };

        match normalize(&found) {
            Ok(identifier) => {
                if seen.insert(identifier.clone()) {
                    debug!(doi = %identifier, raw = found.raw, "DOI extracted");
                    report.identifiers.push(identifier);
                } else {
                    report.duplicates += 1;
                }
            }
            Err(error) => {
                debug!(token, error = %error, "DOI candidate dropped");
                report.skipped.push(SkippedToken {
                    token: token.to_string(),
                    error,
                });
            }
        }
    }

    info!(
        tokens = report.tokens_scanned,
        dois = report.identifiers.len(),
        duplicates = report.duplicates,
        skipped = report.skipped.len(),
        "Extraction complete"
    );

    report
}
