//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use rbac_model::Permission;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log levels accepted by [`LoggingConfig::level`].
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Authorization configuration after merging all layers.
///
/// # Example
///
/// ```
/// use rbac_cache::config::AuthzConfig;
///
/// let config = AuthzConfig::from_toml(r#"
/// grants_file = "/etc/rbac/grants.toml"
///
/// [[guest_permissions]]
/// actions = ["read"]
/// scopes = ["Project"]
/// "#).unwrap();
///
/// assert_eq!(config.guest_permissions.len(), 1);
/// assert_eq!(config.logging.level, "warn");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthzConfig {
    /// Path of the TOML grants file read by `FileResolver`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grants_file: Option<PathBuf>,

    /// Permissions granted to every authenticated user in every project.
    pub guest_permissions: Vec<Permission>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl AuthzConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or a guest permission is
    /// invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they differ
    /// from the default. Guest permissions are replaced, not appended.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.grants_file.is_some() {
            self.grants_file.clone_from(&other.grants_file);
        }
        if other.guest_permissions != default.guest_permissions {
            self.guest_permissions.clone_from(&other.guest_permissions);
        }
        if other.logging.level != default.logging.level {
            self.logging.level.clone_from(&other.logging.level);
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when neither CLI flags nor `RUST_LOG` are set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
