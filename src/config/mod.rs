//! Configuration loading for subissue.
//!
//! Supports subissue.toml, CLI flags, and environment variables.
//! Precedence (highest to lowest): CLI flags > env vars > config file > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs};
pub use types::{
    Config, ConfigError, DEFAULT_ABILITY_TICKETS, DEFAULT_CONFIG_FILE, DEFAULT_LABEL,
    DEFAULT_MOVE_TICKETS, DEFAULT_REPO, DEFAULT_TRACKER_CLI,
};

#[cfg(test)]
mod tests;
