//! Cache construction and resolver errors.
//!
//! Query-time code has no error path: `has_permission` answers `false`
//! for anything it cannot match. These errors only surface while a new
//! cache generation is being built.

use rbac_model::{ErrorCode, ModelError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from building or refreshing a cache generation.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A grant named no user.
    #[error("grant for project '{project}' has an empty user")]
    EmptyUser { project: String },

    /// A grant named no project.
    #[error("grant for user '{user}' has an empty project")]
    EmptyProject { user: String },

    /// The resolver could not produce the grant set.
    #[error("failed to resolve permissions: {0}")]
    Resolve(#[from] ResolveError),
}

impl ErrorCode for CacheError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyUser { .. } => "CACHE_EMPTY_USER",
            Self::EmptyProject { .. } => "CACHE_EMPTY_PROJECT",
            Self::Resolve(_) => "CACHE_RESOLVE_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyUser { .. } | Self::EmptyProject { .. } => false,
            Self::Resolve(e) => e.is_recoverable(),
        }
    }
}

/// Errors from a [`PermissionResolver`](crate::PermissionResolver).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Failed to read a grants file.
    #[error("failed to read grants file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a grants file.
    #[error("failed to parse grants file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A grant carried an invalid permission.
    #[error("invalid grant for user '{user}': {source}")]
    InvalidGrant {
        user: String,
        #[source]
        source: ModelError,
    },

    /// Backend-specific failure of a custom resolver.
    #[error("permission backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Wraps a backend error from a custom resolver.
    pub fn backend(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(source))
    }
}

impl ErrorCode for ResolveError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "RESOLVE_READ_FILE",
            Self::ParseToml { .. } => "RESOLVE_PARSE_TOML",
            Self::InvalidGrant { .. } => "RESOLVE_INVALID_GRANT",
            Self::Backend(_) => "RESOLVE_BACKEND",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A file can be fixed and a backend can come back; a bad grant is
        // the resolver's bug.
        !matches!(self, Self::InvalidGrant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbac_model::assert_error_code;

    #[test]
    fn cache_error_codes() {
        let err = CacheError::EmptyUser {
            project: "p".into(),
        };
        assert_error_code(&err, "CACHE_");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("empty user"));

        let err = CacheError::EmptyProject { user: "u".into() };
        assert_error_code(&err, "CACHE_");
    }

    #[test]
    fn resolve_error_recoverability_flows_through() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CacheError::from(ResolveError::read_file("/tmp/grants.toml", io));
        assert_eq!(err.code(), "CACHE_RESOLVE_FAILED");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("/tmp/grants.toml"), "got: {err}");
    }

    #[test]
    fn invalid_grant_is_not_recoverable() {
        let err = ResolveError::InvalidGrant {
            user: "alice".into(),
            source: ModelError::EmptyScopes,
        };
        assert_error_code(&err, "RESOLVE_");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("alice"));
    }
}
