//! Dashboard configuration
//!
//! Re-exports the shared config type from evalboard-types and provides
//! persistence plus the environment override for the API base URL.

use std::path::{Path, PathBuf};

pub use evalboard_types::DashboardConfig;

use super::error::ConfigError;

pub const APP_NAME: &str = "evalboard";
pub const CONFIG_NAME: &str = "config";

/// Environment variable that overrides the configured base URL
pub const BASE_URL_ENV: &str = "EVALBOARD_API_BASE_URL";

/// Extension trait for DashboardConfig persistence
pub trait DashboardConfigExt: Sized {
    fn load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<PathBuf, ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn with_env_override(self, value: Option<String>) -> Self;
    fn validate(self) -> Result<Self, ConfigError>;
}

impl DashboardConfigExt for DashboardConfig {
    /// Load from the config file, apply the environment override and
    /// require a base URL.
    fn load() -> Result<Self, ConfigError> {
        let path = confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?;
        Self::load_from(&path)?
            .with_env_override(std::env::var(BASE_URL_ENV).ok())
            .validate()
    }

    /// Read a config file as stored, without the environment override.
    /// A missing file is created with defaults.
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    /// Persist to the default config location and return its path
    fn save(&self) -> Result<PathBuf, ConfigError> {
        let path =
            confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Save)?;
        self.save_to(&path)?;
        Ok(path)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Save)
    }

    fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string())
            && !url.is_empty()
        {
            self.api_base_url = url;
        }
        self
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl { env: BASE_URL_ENV });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_replaces_file_value() {
        let config = DashboardConfig::with_base_url("http://file:8000")
            .with_env_override(Some("http://env:9000".to_string()));
        assert_eq!(config.api_base_url, "http://env:9000");
    }

    #[test]
    fn blank_env_value_keeps_file_value() {
        let config = DashboardConfig::with_base_url("http://file:8000")
            .with_env_override(Some("   ".to_string()));
        assert_eq!(config.api_base_url, "http://file:8000");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = std::env::temp_dir().join(format!("evalboard-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        DashboardConfig::with_base_url("http://saved:8000")
            .save_to(&path)
            .unwrap();
        let loaded = DashboardConfig::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(loaded.api_base_url, "http://saved:8000");
    }

    #[test]
    fn missing_base_url_is_rejected() {
        let err = DashboardConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl { .. }));
    }
}
