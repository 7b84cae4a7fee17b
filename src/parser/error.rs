//! Error types for DOI extraction.
//!
//! Extraction itself never fails; these errors describe why a single token
//! was dropped so callers can surface diagnostics.

use thiserror::Error;

/// Reasons a DOI candidate token was dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The matched DOI carried percent-encoding that could not be decoded
    #[error("malformed percent-encoding in '{token}': {reason}\n  Suggestion: {suggestion}")]
    MalformedEncoding {
        /// The matched DOI text before decoding
        token: String,
        /// What was wrong with the encoding
        reason: String,
        /// How to fix the input
        suggestion: String,
    },
}

impl ParseError {
    /// Creates a `MalformedEncoding` error for a `%` not followed by two hex digits.
    #[must_use]
    pub fn bad_escape(token: &str, position: usize) -> Self {
        Self::MalformedEncoding {
            token: token.to_string(),
            reason: format!("'%' at byte {position} is not followed by two hex digits"),
            suggestion: "Copy the DOI from the publisher page or decode it manually".to_string(),
        }
    }

    /// Creates a `MalformedEncoding` error for escapes that decode to invalid UTF-8.
    #[must_use]
    pub fn not_utf8(token: &str) -> Self {
        Self::MalformedEncoding {
            token: token.to_string(),
            reason: "percent escapes do not decode to valid UTF-8".to_string(),
            suggestion: "Check that the DOI was not truncated while copying".to_string(),
        }
    }

    /// Creates a `MalformedEncoding` error for escapes that decode to a
    /// character no DOI suffix may contain.
    #[must_use]
    pub fn decodes_outside_grammar(token: &str, decoded: char) -> Self {
        Self::MalformedEncoding {
            token: token.to_string(),
            reason: format!("escape decodes to {decoded:?}, which is not allowed in a DOI"),
            suggestion: "Remove the escaped character or paste the DOI as shown by doi.org"
                .to_string(),
        }
    }

    /// Returns the offending token.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::MalformedEncoding { token, .. } => token,
        }
    }
}
