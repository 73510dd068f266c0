mod config;
mod error;

pub use config::{APP_NAME, BASE_URL_ENV, CONFIG_NAME, DashboardConfigExt};
pub use error::ConfigError;
