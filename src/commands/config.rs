//! Config command handlers: show effective configuration.

use anyhow::Result;

use crate::app::config_runtime::{self, API_URL_ENV};
use crate::app_config::{LoadedConfig, VerbositySetting};
use crate::cli::RecommendArgs;

pub(crate) fn run_config_show_command(
    loaded_config: &LoadedConfig,
    verbosity: VerbositySetting,
) -> Result<()> {
    let file_config = loaded_config.config.as_ref();
    let settings = config_runtime::resolve_recommend_settings(
        &RecommendArgs::default(),
        config_runtime::api_url_from_env(),
        file_config,
    )?;

    let resolved_path = loaded_config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded_config.loaded_from_file() {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!(
        "api_url = {} ({}{})",
        settings.client.api_url,
        settings.api_url_origin.as_str(),
        if settings.api_url_origin == config_runtime::ValueOrigin::Env {
            format!(": {API_URL_ENV}")
        } else {
            String::new()
        }
    );
    println!("endpoint = {}", settings.client.endpoint);
    println!("query_limit = {}", settings.query_limit);
    println!(
        "connect_timeout_secs = {}",
        settings.client.timeouts.connect_secs
    );
    println!("read_timeout_secs = {}", settings.client.timeouts.read_secs);
    println!("verbosity = {}", verbosity.as_str());

    Ok(())
}
