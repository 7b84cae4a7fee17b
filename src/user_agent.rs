//! Shared User-Agent string for outbound HTTP requests.

/// Default User-Agent for recommendation requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("oshima/{version} (paper-recommendation-client)")
}
