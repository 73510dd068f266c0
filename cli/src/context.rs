use evalboard_core::context::{ConfigError, DashboardConfigExt};
use evalboard_core::{DashboardConfig, Gateway, HttpGateway, SessionDriver};

/// Holds all state for the CLI application.
/// The dashboard logic lives in the session; this only wires it to a gateway.
pub struct CliContext<G = HttpGateway> {
    pub config: DashboardConfig,
    pub driver: SessionDriver<G>,
}

impl CliContext<HttpGateway> {
    /// Load configuration and connect to the configured server.
    pub fn new() -> Result<Self, ConfigError> {
        let config = DashboardConfig::load()?;
        let gateway = HttpGateway::from_config(&config);
        Ok(Self::with_gateway(config, gateway))
    }
}

impl<G: Gateway> CliContext<G> {
    pub fn with_gateway(config: DashboardConfig, gateway: G) -> Self {
        Self {
            config,
            driver: SessionDriver::new(gateway),
        }
    }
}
