//! CLI command handlers.

mod config;
mod extract;
mod recommend;

pub(crate) use config::run_config_show_command;
pub(crate) use extract::run_extract_command;
pub(crate) use recommend::run_recommend_command;
