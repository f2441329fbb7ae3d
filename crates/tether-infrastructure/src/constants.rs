//! Infrastructure layer constants
//!
//! Domain-level constants (reserved override keys, separators) live in
//! `tether_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tether.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tether";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TETHER";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "TETHER_LOG";

/// File stem used when the log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "tether";

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Cycle detection is on unless configured otherwise
pub const DEFAULT_DETECT_CYCLES: bool = true;

/// Resolvers for named definitions are cached unless configured otherwise
pub const DEFAULT_CACHE_RESOLVERS: bool = true;
