//! Error types for configuration

use thiserror::Error;

/// Errors during configuration loading and persistence
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("no API base URL configured (set api_base_url in the config file or {env})")]
    MissingBaseUrl { env: &'static str },
}
