//! Layered authorization configuration.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌───────────────────────────────────────────┐
//! │  1. Environment Variables (RBAC_*)        │  Runtime override
//! ├───────────────────────────────────────────┤
//! │  2. Explicit Config (--config <path>)     │  Deployment-specific
//! ├───────────────────────────────────────────┤
//! │  3. Global Config (~/.rbac/config.toml)   │  User defaults
//! ├───────────────────────────────────────────┤
//! │  4. Default Values (compile-time)         │  Fallback
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `RBAC_GRANTS_FILE` | `grants_file` | PathBuf |
//! | `RBAC_LOG_LEVEL` | `logging.level` | one of [`LOG_LEVELS`] |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.rbac/config.toml
//!
//! # Relative paths resolve against this file's directory.
//! grants_file = "grants.toml"
//!
//! # Every authenticated user may read projects.
//! [[guest_permissions]]
//! actions = ["read"]
//! scopes = ["Project"]
//!
//! [logging]
//! level = "warn"
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{AuthzConfig, LoggingConfig, LOG_LEVELS};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".rbac")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}
