//! Configuration loader with layered merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.rbac/config.toml`)
//! 3. Explicit config file (`--config`)
//! 4. Environment variables (`RBAC_*`)
//!
//! Each layer overrides the previous.

use super::{default_config_path, AuthzConfig, ConfigError, LOG_LEVELS};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use rbac_cache::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_config_file("/etc/rbac/config.toml")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), rbac_cache::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.rbac/config.toml).
    global_config_path: Option<PathBuf>,

    /// Explicit config file. Unlike the global file, it must exist.
    config_file: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets an explicit config file layered over the global one.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be parsed,
    /// if the explicit config file cannot be read, or if an `RBAC_*`
    /// variable holds an invalid value. A missing global file is ignored.
    pub fn load(&self) -> Result<AuthzConfig, ConfigError> {
        let mut config = AuthzConfig::default();

        // Layer 1: Global config
        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if global_path.exists() {
                let global_config = load_file(&global_path)?;
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        // Layer 2: Explicit config file
        if let Some(ref path) = self.config_file {
            let file_config = load_file(path)?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(&file_config);
        }

        // Layer 3: Environment variables
        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }
}

/// Reads and parses one config file.
///
/// A relative `grants_file` is resolved against the config file's
/// directory. `logging.level` is checked and normalized like
/// `RBAC_LOG_LEVEL`.
fn load_file(path: &Path) -> Result<AuthzConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut config =
        AuthzConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

    config.logging.level = parse_level(&config.logging.level).ok_or_else(|| {
        ConfigError::invalid_value(
            path,
            "logging.level",
            format!("'{}': {}", config.logging.level, expected_levels()),
        )
    })?;

    if let (Some(grants), Some(dir)) = (config.grants_file.as_mut(), path.parent()) {
        if grants.is_relative() {
            *grants = dir.join(&*grants);
        }
    }

    Ok(config)
}

/// Applies `RBAC_*` environment variable overrides.
fn apply_env_vars(config: &mut AuthzConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("RBAC_GRANTS_FILE") {
        if val.is_empty() {
            return Err(ConfigError::invalid_env_var(
                "RBAC_GRANTS_FILE",
                "expected a path",
            ));
        }
        config.grants_file = Some(PathBuf::from(val));
    }

    if let Ok(val) = std::env::var("RBAC_LOG_LEVEL") {
        config.logging.level = parse_level(&val).ok_or_else(|| {
            ConfigError::invalid_env_var("RBAC_LOG_LEVEL", expected_levels())
        })?;
    }

    Ok(())
}

fn expected_levels() -> String {
    format!("expected one of {}", LOG_LEVELS.join(", "))
}

/// Normalizes a log level name (case-insensitive).
fn parse_level(s: &str) -> Option<String> {
    let level = s.to_lowercase();
    LOG_LEVELS.contains(&level.as_str()).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbac_model::{Action, Permission, Scope};
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new()
            .skip_global_config()
            .skip_env_vars()
            .load()
            .expect("defaults");

        assert_eq!(config, AuthzConfig::default());
    }

    #[test]
    fn load_global_config() {
        let temp = TempDir::new().expect("temp dir");
        let path = create_config_file(
            temp.path(),
            r#"
grants_file = "/etc/rbac/grants.toml"

[logging]
level = "info"
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&path)
            .skip_env_vars()
            .load()
            .expect("global config");

        assert_eq!(
            config.grants_file,
            Some(PathBuf::from("/etc/rbac/grants.toml"))
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn explicit_file_overrides_global() {
        let global_temp = TempDir::new().expect("temp dir");
        let explicit_temp = TempDir::new().expect("temp dir");

        let global = create_config_file(
            global_temp.path(),
            r#"
grants_file = "/global/grants.toml"

[logging]
level = "info"
"#,
        );
        let explicit = create_config_file(
            explicit_temp.path(),
            r#"
[[guest_permissions]]
actions = ["read"]
scopes = ["Project"]
"#,
        );

        let config = ConfigLoader::new()
            .with_global_config(&global)
            .with_config_file(&explicit)
            .skip_env_vars()
            .load()
            .expect("layered config");

        // From global, not overridden
        assert_eq!(config.grants_file, Some(PathBuf::from("/global/grants.toml")));
        assert_eq!(config.logging.level, "info");
        // From explicit file
        assert_eq!(
            config.guest_permissions,
            vec![Permission::new([Action::Read], [Scope::Project]).expect("valid")]
        );
    }

    #[test]
    fn relative_grants_file_resolves_against_config_dir() {
        let temp = TempDir::new().expect("temp dir");
        let path = create_config_file(temp.path(), "grants_file = \"grants.toml\"\n");

        let config = ConfigLoader::new()
            .skip_global_config()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .expect("config");

        assert_eq!(config.grants_file, Some(temp.path().join("grants.toml")));
    }

    #[test]
    fn missing_global_config_ok() {
        let config = ConfigLoader::new()
            .with_global_config("/nonexistent/path/config.toml")
            .skip_env_vars()
            .load()
            .expect("missing global is ignored");

        assert_eq!(config, AuthzConfig::default());
    }

    #[test]
    fn missing_explicit_config_is_error() {
        let err = ConfigLoader::new()
            .skip_global_config()
            .with_config_file("/nonexistent/path/config.toml")
            .skip_env_vars()
            .load()
            .expect_err("explicit file must exist");

        assert!(matches!(err, ConfigError::ReadFile { .. }), "got: {err}");
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = create_config_file(temp.path(), "logging = 42\n");

        let err = ConfigLoader::new()
            .skip_global_config()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .expect_err("bad config");

        assert!(matches!(err, ConfigError::ParseToml { .. }), "got: {err}");
    }

    #[test]
    fn unknown_log_level_in_file_is_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let path = create_config_file(temp.path(), "[logging]\nlevel = \"verbose\"\n");

        let err = ConfigLoader::new()
            .skip_global_config()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .expect_err("unknown level");

        assert!(
            matches!(err, ConfigError::InvalidValue { field: "logging.level", .. }),
            "got: {err}"
        );
        assert!(err.to_string().contains("'verbose'"), "got: {err}");
    }

    #[test]
    fn log_level_in_file_is_normalized() {
        let temp = TempDir::new().expect("temp dir");
        let path = create_config_file(temp.path(), "[logging]\nlevel = \"DEBUG\"\n");

        let config = ConfigLoader::new()
            .skip_global_config()
            .with_config_file(&path)
            .skip_env_vars()
            .load()
            .expect("valid level");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_level_values() {
        assert_eq!(parse_level("debug").as_deref(), Some("debug"));
        assert_eq!(parse_level("WARN").as_deref(), Some("warn"));
        assert_eq!(parse_level("Off").as_deref(), Some("off"));
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }
}
