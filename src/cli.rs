//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap and validates them
//! into a `StartupConfig` before the cache and client are built.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Default cache interval in seconds (one hour)
pub const DEFAULT_CACHE_INTERVAL_SECS: u64 = 3600;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache interval was zero
    #[error("Invalid cache interval: {0}. The interval must be at least 1 second")]
    InvalidInterval(u64),

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex CLI - Explore PokeAPI location areas and catch pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Explore PokeAPI location areas and catch pokemon")]
#[command(version)]
pub struct Cli {
    /// How long API responses stay cached, in seconds
    ///
    /// Cached responses are swept once per interval and removed once they are
    /// older than it.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_CACHE_INTERVAL_SECS)]
    pub cache_interval: u64,

    /// Base URL of the PokeAPI server
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Expiry interval for the response cache
    pub cache_interval: Duration,
    /// Base URL for API requests
    pub base_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_interval: Duration::from_secs(DEFAULT_CACHE_INTERVAL_SECS),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the interval is zero or the URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_interval == 0 {
            return Err(CliError::InvalidInterval(cli.cache_interval));
        }
        if !(cli.base_url.starts_with("http://") || cli.base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            cache_interval: Duration::from_secs(cli.cache_interval),
            base_url: cli.base_url.clone(),
        })
    }
}
