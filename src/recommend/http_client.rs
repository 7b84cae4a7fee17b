//! HTTP client construction for the recommendation service.
//!
//! Centralizes timeout, user-agent, compression, and proxy behavior so every
//! request to the service goes out the same way.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::user_agent;

use super::RecommendError;

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout; recommendation scoring can be slow.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;

/// Timeouts applied to the recommendation client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Connect timeout in seconds
    pub connect_secs: u64,
    /// Whole-request timeout in seconds
    pub read_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Builds the recommendation HTTP client.
///
/// # Errors
///
/// Returns [`RecommendError::ClientBuild`] when client construction fails.
pub fn build_http_client(timeouts: HttpTimeouts) -> Result<Client, RecommendError> {
    match try_build_client(timeouts, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with env-proxy support only.
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(timeouts, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(RecommendError::ClientBuild {
                    reason: "client construction panicked while initializing networking"
                        .to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(RecommendError::ClientBuild {
                    reason: error.to_string(),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(RecommendError::ClientBuild {
            reason: error.to_string(),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    timeouts: HttpTimeouts,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(timeouts);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.read_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let timeouts = HttpTimeouts::default();
        assert_eq!(timeouts.connect_secs, 10);
        assert_eq!(timeouts.read_secs, 60);
    }

    #[test]
    fn test_env_proxy_unknown_scheme_is_none() {
        assert!(env_proxy_for_scheme("ftp").is_none());
    }
}
