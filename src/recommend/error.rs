//! Error types for recommendation requests.
//!
//! Every failure here is recoverable from the user's point of view: the
//! identifier set is untouched and the request can be submitted again.

use thiserror::Error;

/// Errors that can occur while requesting recommendations.
#[derive(Debug, Clone, Error)]
pub enum RecommendError {
    /// Nothing to submit
    #[error("no DOIs to submit\n  Suggestion: Paste DOIs or add a .bib/.ris file first")]
    EmptyQuery,

    /// The configured API base URL is unusable
    #[error("invalid API URL '{url}': {reason}\n  Suggestion: Use an http:// or https:// base URL")]
    InvalidApiUrl {
        /// The configured URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// HTTP client could not be constructed
    #[error("failed to initialize HTTP client: {reason}")]
    ClientBuild {
        /// Underlying builder failure
        reason: String,
    },

    /// The service could not be reached
    #[error("cannot reach recommendation service at '{url}': {reason}\n  Suggestion: Check your network connection and try again")]
    Network {
        /// Endpoint that was called
        url: String,
        /// Transport failure description
        reason: String,
    },

    /// The service answered with a non-success status
    #[error("recommendation service returned HTTP {status}: {reason}\n  Suggestion: {suggestion}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Human-readable reason
        reason: String,
        /// How to proceed
        suggestion: String,
    },

    /// The response body was not the expected JSON
    #[error("unexpected response from recommendation service: {reason}")]
    Decode {
        /// Deserialization failure description
        reason: String,
    },
}

impl RecommendError {
    /// Creates a `Status` error with a reason and suggestion derived from the code.
    #[must_use]
    pub fn status(status: u16) -> Self {
        let (reason, suggestion) = match status {
            400 => ("request rejected", "Check that the submitted DOIs are valid"),
            404 => ("endpoint not found", "Check the configured endpoint name"),
            429 => (
                "rate limit exceeded",
                "Wait a few seconds and submit again",
            ),
            s if s >= 500 => ("service unavailable", "Try again later"),
            _ => ("request failed", "Try again later"),
        };
        Self::Status {
            status,
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates an `InvalidApiUrl` error.
    #[must_use]
    pub fn invalid_api_url(url: &str, reason: &str) -> Self {
        Self::InvalidApiUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if submitting the same request again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::EmptyQuery
            | Self::InvalidApiUrl { .. }
            | Self::ClientBuild { .. }
            | Self::Decode { .. } => false,
        }
    }
}
