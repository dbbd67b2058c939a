//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod catalog;
pub mod map;

use crate::biomart::ServerConfig;
use crate::cli::Cli;

/// Server settings from the global flags, falling back to `default_host`
pub(crate) fn server_config(cli: &Cli, default_host: &str) -> ServerConfig {
    let mut server = ServerConfig::from_env();
    server.host = cli.host.clone().unwrap_or_else(|| default_host.to_string());
    if let Some(path) = &cli.path {
        server.path = path.clone();
    }
    server
}
