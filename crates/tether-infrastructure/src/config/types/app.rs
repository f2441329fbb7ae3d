//! Main application configuration

use serde::{Deserialize, Serialize};

use super::container::ContainerConfig;
use super::logging::LoggingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Container definitions and resolution policy
    #[serde(default)]
    pub container: ContainerConfig,
}
