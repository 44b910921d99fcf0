//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod config;
mod logging;
mod version;

pub use commands::{
    GetArgs, SetArgs, handle_get, handle_set, resolve_namespace, rollout_settings,
};
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::{BuildInfo, display_version};
