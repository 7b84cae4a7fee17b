//! Submitting aggregated DOIs to the recommendation service.
//!
//! The service takes a JSON body `{"queries": [<doi>, ...]}` via POST and
//! answers with `{"recommendations": [...]}`. The request is built from the
//! capped aggregate at submission time; nothing here mutates the sources.
//!
//! # Architecture
//!
//! - [`Recommender`] - Async trait for anything that turns DOIs into recommendations
//! - [`HttpRecommender`] - The HTTP implementation used by the CLI
//! - [`submit`] - Caps the aggregate and calls a recommender
//!
//! # Example
//!
//! ```no_run
//! use oshima_core::recommend::{ClientConfig, HttpRecommender, submit};
//! use oshima_core::{DEFAULT_QUERY_CAP, SourceAggregator, extract};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sources = SourceAggregator::new();
//! sources.set_pasted_source(extract("https://doi.org/10.1000/182"));
//!
//! let recommender = HttpRecommender::new(&ClientConfig::default())?;
//! let submission = submit(&sources, &recommender, DEFAULT_QUERY_CAP).await?;
//! for paper in &submission.recommendations {
//!     println!("{}", paper.display_title());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;

pub use error::RecommendError;
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts, build_http_client,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::aggregator::SourceAggregator;

/// Default base URL of the recommendation service.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default endpoint path appended to the base URL.
pub const DEFAULT_ENDPOINT: &str = "recommend";

// ==================== Wire Types ====================

/// Request body sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// DOIs to base recommendations on
    pub queries: Vec<String>,
}

/// Response body returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationResponse {
    /// Recommended papers, best first
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// One recommended paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Paper title
    #[serde(default)]
    pub title: Option<String>,
    /// Paper DOI, when the service knows it
    #[serde(default)]
    pub doi: Option<String>,
    /// Publication year
    #[serde(default)]
    pub year: Option<i32>,
    /// Relevance score assigned by the service
    #[serde(default)]
    pub score: f64,
    /// Author list, joined with ", "
    #[serde(default, deserialize_with = "authors_from_string_or_list")]
    pub authors: Option<String>,
    /// Journal or venue name
    #[serde(default)]
    pub journal: Option<String>,
    /// Abstract text
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl Recommendation {
    /// Returns the title, or a placeholder when the service sent none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("No title available")
    }

    /// Returns a resolver link for the paper's DOI.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        self.doi
            .as_deref()
            .filter(|doi| !doi.is_empty())
            .map(|doi| format!("https://dx.doi.org/{doi}"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorsField {
    Joined(String),
    List(Vec<String>),
}

fn authors_from_string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<AuthorsField>::deserialize(deserializer)?;
    Ok(field
        .map(|field| match field {
            AuthorsField::Joined(joined) => joined,
            AuthorsField::List(names) => names.join(", "),
        })
        .filter(|joined| !joined.is_empty()))
}

// ==================== Client ====================

/// Connection settings for [`HttpRecommender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service
    pub api_url: String,
    /// Endpoint path under the base URL
    pub endpoint: String,
    /// HTTP timeouts
    pub timeouts: HttpTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

/// Joins a base URL and endpoint name into the request URL.
///
/// # Errors
///
/// Returns [`RecommendError::InvalidApiUrl`] when the base URL does not
/// parse, is not http(s), or has no host.
pub fn endpoint_url(api_url: &str, endpoint: &str) -> Result<Url, RecommendError> {
    let base = Url::parse(api_url.trim())
        .map_err(|e| RecommendError::invalid_api_url(api_url, &e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(RecommendError::invalid_api_url(
            api_url,
            &format!("scheme '{}' is not supported", base.scheme()),
        ));
    }
    if base.host_str().is_none() {
        return Err(RecommendError::invalid_api_url(api_url, "URL has no host"));
    }

    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        endpoint.trim().trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| RecommendError::invalid_api_url(&joined, &e.to_string()))
}

/// Turns a list of DOIs into paper recommendations.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Requests recommendations for `queries`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError`] when the request cannot be made or the
    /// service rejects it.
    async fn recommend(&self, queries: &[String]) -> Result<Vec<Recommendation>, RecommendError>;
}

/// Recommender backed by the HTTP service.
pub struct HttpRecommender {
    client: Client,
    endpoint: Url,
}

impl HttpRecommender {
    /// Creates a recommender for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, RecommendError> {
        let endpoint = endpoint_url(&config.api_url, &config.endpoint)?;
        let client = build_http_client(config.timeouts)?;
        Ok(Self { client, endpoint })
    }

    /// Returns the URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpRecommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecommender")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Recommender for HttpRecommender {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, queries = queries.len()))]
    async fn recommend(&self, queries: &[String]) -> Result<Vec<Recommendation>, RecommendError> {
        if queries.is_empty() {
            return Err(RecommendError::EmptyQuery);
        }

        let body = RecommendationRequest {
            queries: queries.to_vec(),
        };

        debug!("Posting recommendation request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Recommendation request failed");
                RecommendError::Network {
                    url: self.endpoint.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Recommendation service error");
            return Err(RecommendError::status(status.as_u16()));
        }

        let parsed = response
            .json::<RecommendationResponse>()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to parse recommendation response JSON");
                RecommendError::Decode {
                    reason: e.to_string(),
                }
            })?;

        info!(count = parsed.recommendations.len(), "Recommendations received");
        Ok(parsed.recommendations)
    }
}

// ==================== Submission ====================

/// What was sent and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// DOIs sent, in aggregate order
    pub queries: Vec<String>,
    /// Service answer
    pub recommendations: Vec<Recommendation>,
}

/// Submits the first `cap` aggregated DOIs to `recommender`.
///
/// # Errors
///
/// Returns [`RecommendError::EmptyQuery`] when there is nothing to send,
/// or whatever the recommender reports.
pub async fn submit(
    aggregator: &SourceAggregator,
    recommender: &dyn Recommender,
    cap: usize,
) -> Result<Submission, RecommendError> {
    let queries = aggregator.get_aggregate_capped(cap);
    if queries.is_empty() {
        return Err(RecommendError::EmptyQuery);
    }

    let total = aggregator.get_aggregate().len();
    if total > queries.len() {
        info!(total, sent = queries.len(), cap, "Aggregate capped for submission");
    }

    let recommendations = recommender.recommend(&queries).await?;
    Ok(Submission {
        queries,
        recommendations,
    })
}
