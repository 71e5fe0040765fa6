//! Variable name rules.
//!
//! A variable is referenced as `$name` inside queries, so a name made only
//! of digits would collide with positional placeholders such as the `$1`
//! of PromQL's `label_replace`.

use crate::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix reserved for variables the server injects itself.
pub const BUILTIN_VARIABLE_PREFIX: &str = "__";

// ASCII word characters around at least one non-digit.
static VARIABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)*?[^0-9](?-u:\w)*$").expect("variable name pattern is valid")
});

/// Returns `true` if `name` carries the builtin prefix.
#[must_use]
pub fn is_builtin_variable(name: &str) -> bool {
    name.starts_with(BUILTIN_VARIABLE_PREFIX)
}

/// Validates a single variable name.
///
/// # Errors
///
/// - [`ValidationError::InvalidVariableName`] if the name is empty, only
///   digits, or otherwise fails the pattern
/// - [`ValidationError::BuiltinVariablePrefix`] if it starts with `__`
pub fn validate_variable_name(name: &str) -> Result<(), ValidationError> {
    if !VARIABLE_NAME.is_match(name) {
        return Err(ValidationError::InvalidVariableName {
            name: name.to_string(),
        });
    }
    if is_builtin_variable(name) {
        return Err(ValidationError::BuiltinVariablePrefix {
            name: name.to_string(),
            prefix: BUILTIN_VARIABLE_PREFIX,
        });
    }
    Ok(())
}

/// Validates names in order; the first failure is returned.
pub fn validate_variable_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    names.into_iter().try_for_each(validate_variable_name)
}
