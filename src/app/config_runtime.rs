//! Effective settings: CLI flags layered over environment, config file, and defaults.

use anyhow::{Result, bail};
use oshima_core::DEFAULT_QUERY_CAP;
use oshima_core::recommend::{ClientConfig, DEFAULT_API_URL, DEFAULT_ENDPOINT, HttpTimeouts};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::{Cli, RecommendArgs};

/// Environment variable overriding the configured API base URL.
pub(crate) const API_URL_ENV: &str = "OSHIMA_API_URL";

/// Where an effective value came from, for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueOrigin {
    Cli,
    Env,
    File,
    Default,
}

impl ValueOrigin {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Env => "env",
            Self::File => "config",
            Self::Default => "default",
        }
    }
}

/// Fully resolved settings for a recommendation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendSettings {
    pub(crate) client: ClientConfig,
    pub(crate) api_url_origin: ValueOrigin,
    pub(crate) query_limit: usize,
}

/// Reads the API URL override from the environment, ignoring blank values.
pub(crate) fn api_url_from_env() -> Option<String> {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves service settings. `env_api_url` is passed in so the layering stays testable.
pub(crate) fn resolve_recommend_settings(
    args: &RecommendArgs,
    env_api_url: Option<String>,
    file_config: Option<&FileConfig>,
) -> Result<RecommendSettings> {
    let (api_url, api_url_origin) = if let Some(url) = &args.api_url {
        (url.clone(), ValueOrigin::Cli)
    } else if let Some(url) = env_api_url {
        (url, ValueOrigin::Env)
    } else if let Some(url) = file_config.and_then(|cfg| cfg.api_url.clone()) {
        (url, ValueOrigin::File)
    } else {
        (DEFAULT_API_URL.to_string(), ValueOrigin::Default)
    };

    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| file_config.and_then(|cfg| cfg.endpoint.clone()))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    if endpoint.trim().is_empty() {
        bail!("Invalid endpoint: must not be empty");
    }

    let query_limit = args
        .input
        .limit
        .or_else(|| file_config.and_then(|cfg| cfg.query_limit))
        .map_or(DEFAULT_QUERY_CAP, usize::from);

    Ok(RecommendSettings {
        client: ClientConfig {
            api_url,
            endpoint,
            timeouts: resolve_http_timeouts(file_config),
        },
        api_url_origin,
        query_limit,
    })
}

pub(crate) fn resolve_http_timeouts(file_config: Option<&FileConfig>) -> HttpTimeouts {
    let mut timeouts = HttpTimeouts::default();
    let Some(file_config) = file_config else {
        return timeouts;
    };
    if let Some(value) = file_config.connect_timeout_secs {
        timeouts.connect_secs = value;
    }
    if let Some(value) = file_config.read_timeout_secs {
        timeouts.read_secs = value;
    }
    timeouts
}

/// Explicit `-v`/`-q` flags win; otherwise the config file's verbosity applies.
pub(crate) fn resolve_verbosity(cli: &Cli, file_config: Option<&FileConfig>) -> VerbositySetting {
    if cli.quiet {
        VerbositySetting::Quiet
    } else if cli.verbose == 1 {
        VerbositySetting::Verbose
    } else if cli.verbose > 1 {
        VerbositySetting::Debug
    } else {
        file_config
            .and_then(|cfg| cfg.verbosity)
            .unwrap_or_default()
    }
}

pub(crate) fn resolve_default_log_level(verbosity: VerbositySetting) -> &'static str {
    match verbosity {
        VerbositySetting::Quiet => "error",
        VerbositySetting::Default => "info",
        VerbositySetting::Verbose => "debug",
        VerbositySetting::Debug => "trace",
    }
}

/// When the user passed `-v` or `-q`, `RUST_LOG` is ignored.
pub(crate) fn should_force_cli_log_level(cli: &Cli) -> bool {
    cli.verbose > 0 || cli.quiet
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Command;

    fn recommend(argv: &[&str]) -> RecommendArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Some(Command::Recommend(args)) => args,
            other => panic!("expected recommend command, got {other:?}"),
        }
    }

    fn file_config() -> FileConfig {
        FileConfig {
            api_url: Some("https://file.example.com".into()),
            endpoint: Some("file-endpoint".into()),
            query_limit: Some(20),
            connect_timeout_secs: Some(3),
            read_timeout_secs: Some(120),
            verbosity: Some(VerbositySetting::Verbose),
        }
    }

    #[test]
    fn test_defaults_without_any_layer() {
        let args = recommend(&["oshima", "recommend"]);
        let settings = resolve_recommend_settings(&args, None, None).unwrap();
        assert_eq!(settings.client, ClientConfig::default());
        assert_eq!(settings.api_url_origin, ValueOrigin::Default);
        assert_eq!(settings.query_limit, 50);
    }

    #[test]
    fn test_file_layer_applies_when_cli_and_env_absent() {
        let args = recommend(&["oshima", "recommend"]);
        let cfg = file_config();
        let settings = resolve_recommend_settings(&args, None, Some(&cfg)).unwrap();
        assert_eq!(settings.client.api_url, "https://file.example.com");
        assert_eq!(settings.client.endpoint, "file-endpoint");
        assert_eq!(settings.api_url_origin, ValueOrigin::File);
        assert_eq!(settings.query_limit, 20);
        assert_eq!(settings.client.timeouts.connect_secs, 3);
        assert_eq!(settings.client.timeouts.read_secs, 120);
    }

    #[test]
    fn test_env_beats_file_for_api_url() {
        let args = recommend(&["oshima", "recommend"]);
        let cfg = file_config();
        let settings =
            resolve_recommend_settings(&args, Some("http://env:9000".into()), Some(&cfg)).unwrap();
        assert_eq!(settings.client.api_url, "http://env:9000");
        assert_eq!(settings.api_url_origin, ValueOrigin::Env);
    }

    #[test]
    fn test_cli_beats_env_and_file() {
        let args = recommend(&[
            "oshima",
            "recommend",
            "--api-url",
            "http://cli:1",
            "--endpoint",
            "cli-endpoint",
            "-n",
            "7",
        ]);
        let cfg = file_config();
        let settings =
            resolve_recommend_settings(&args, Some("http://env:9000".into()), Some(&cfg)).unwrap();
        assert_eq!(settings.client.api_url, "http://cli:1");
        assert_eq!(settings.client.endpoint, "cli-endpoint");
        assert_eq!(settings.api_url_origin, ValueOrigin::Cli);
        assert_eq!(settings.query_limit, 7);
    }

    #[test]
    fn test_blank_cli_endpoint_rejected() {
        let args = recommend(&["oshima", "recommend", "--endpoint", " "]);
        assert!(resolve_recommend_settings(&args, None, None).is_err());
    }

    #[test]
    fn test_verbosity_cli_flags_override_file() {
        let cfg = file_config();
        let cli = Cli::try_parse_from(["oshima", "-q"]).unwrap();
        assert_eq!(resolve_verbosity(&cli, Some(&cfg)), VerbositySetting::Quiet);
        assert!(should_force_cli_log_level(&cli));

        let cli = Cli::try_parse_from(["oshima", "-vv"]).unwrap();
        assert_eq!(resolve_verbosity(&cli, Some(&cfg)), VerbositySetting::Debug);

        let cli = Cli::try_parse_from(["oshima"]).unwrap();
        assert_eq!(resolve_verbosity(&cli, Some(&cfg)), VerbositySetting::Verbose);
        assert_eq!(resolve_verbosity(&cli, None), VerbositySetting::Default);
        assert!(!should_force_cli_log_level(&cli));
    }

    #[test]
    fn test_log_levels_by_verbosity() {
        assert_eq!(resolve_default_log_level(VerbositySetting::Quiet), "error");
        assert_eq!(resolve_default_log_level(VerbositySetting::Default), "info");
        assert_eq!(resolve_default_log_level(VerbositySetting::Verbose), "debug");
        assert_eq!(resolve_default_log_level(VerbositySetting::Debug), "trace");
    }
}
