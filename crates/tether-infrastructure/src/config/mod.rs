//! Configuration
//!
//! Figment-based loading of [`AppConfig`]: defaults, then a TOML file, then
//! `TETHER_` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, ContainerConfig, LoggingConfig, ResolutionConfig};
