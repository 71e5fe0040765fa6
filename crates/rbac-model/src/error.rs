//! Error types and the unified error code interface.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so callers
//! (the CLI, an HTTP layer) can map failures to stable machine-readable
//! codes without matching on display strings.
//!
//! # Example
//!
//! ```
//! use rbac_model::{ErrorCode, ModelError};
//!
//! let err = ModelError::UnknownAction("approve".to_string());
//! assert_eq!(err.code(), "MODEL_UNKNOWN_ACTION");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g. `"MODEL_EMPTY_SCOPES"`
/// - **Crate-prefixed**: `MODEL_`, `CACHE_`, `RESOLVE_`, `CONFIG_`, `VALIDATION_`
/// - **Stable**: codes are part of the API contract
///
/// # Recoverability
///
/// An error is recoverable when retrying (or fixing an external input such
/// as a file on disk) may succeed. Contract violations and malformed
/// enumeration values are not recoverable.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    fn is_recoverable(&self) -> bool;
}

/// Errors raised while building model values from untrusted input.
///
/// Query-time code never produces these: an unrecognized value at query
/// time is a deny, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The string is not a member of the action enumeration.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// The string is not a member of the scope enumeration.
    #[error("unknown scope '{0}'")]
    UnknownScope(String),

    /// A permission was built with no actions.
    #[error("permission must grant at least one action")]
    EmptyActions,

    /// A permission was built with no scopes.
    #[error("permission must cover at least one scope")]
    EmptyScopes,
}

impl ErrorCode for ModelError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "MODEL_UNKNOWN_ACTION",
            Self::UnknownScope(_) => "MODEL_UNKNOWN_SCOPE",
            Self::EmptyActions => "MODEL_EMPTY_ACTIONS",
            Self::EmptyScopes => "MODEL_EMPTY_SCOPES",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Asserts that an error code follows the workspace conventions.
///
/// Intended for tests of downstream error enums.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
