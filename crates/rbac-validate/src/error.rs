//! Validation errors.

use rbac_model::ErrorCode;
use thiserror::Error;

/// A resource definition that must be rejected before it is stored.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Does not match the variable name pattern.
    #[error("variable name '{name}' is not valid")]
    InvalidVariableName { name: String },

    /// Starts with the prefix reserved for builtin variables.
    #[error("variable name '{name}' can not have builtin variable prefix: {prefix}")]
    BuiltinVariablePrefix { name: String, prefix: &'static str },

    /// Another stored datasource is already the default for this kind.
    #[error(
        "datasource '{name}' cannot be a default '{kind}' because there is already one defined named '{existing}'"
    )]
    DefaultDatasourceTaken {
        name: String,
        kind: String,
        existing: String,
    },

    /// Two datasources local to one dashboard are default for one kind.
    #[error("{name} can not be defined as default datasource: there is already a default defined for kind '{kind}'")]
    DuplicateDashboardDefault { name: String, kind: String },

    /// Input is not a well-formed dashboard document.
    #[error("invalid dashboard document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidVariableName { .. } => "VALIDATION_INVALID_VARIABLE_NAME",
            Self::BuiltinVariablePrefix { .. } => "VALIDATION_BUILTIN_VARIABLE_PREFIX",
            Self::DefaultDatasourceTaken { .. } => "VALIDATION_DEFAULT_DATASOURCE_TAKEN",
            Self::DuplicateDashboardDefault { .. } => "VALIDATION_DUPLICATE_DASHBOARD_DEFAULT",
            Self::Json(_) => "VALIDATION_JSON",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
