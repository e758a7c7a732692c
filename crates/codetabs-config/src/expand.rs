//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CODETABS_TEST_STORE", "/notes");
        }
        let result = expand_env("${CODETABS_TEST_STORE}/blocks.json", "store.path").unwrap();
        assert_eq!(result, "/notes/blocks.json");
        unsafe {
            std::env::remove_var("CODETABS_TEST_STORE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CODETABS_TEST_UNSET");
        }
        let result = expand_env("${CODETABS_TEST_UNSET:-blocks.json}", "store.path").unwrap();
        assert_eq!(result, "blocks.json");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CODETABS_TEST_MISSING");
        }
        let err = expand_env("${CODETABS_TEST_MISSING}", "store.path").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in store.path: ${CODETABS_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("blocks.json", "store.path").unwrap();
        assert_eq!(result, "blocks.json");
    }
}
