//! `codetabs validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use codetabs_data::{Validation, validate};

use super::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// File holding tab data JSON (default: stdin).
    input: Option<PathBuf>,
}

impl ValidateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let input = read_input(self.input.as_deref())?;
        let validation = validate_json(&input)?;

        if validation.is_ok() {
            output.success("Tab data is valid");
            return Ok(());
        }

        for error in &validation.errors {
            output.warning(&format!("  - {error}"));
        }
        Err(CliError::Validation(format!(
            "{} problem(s) found",
            validation.errors.len()
        )))
    }
}

fn validate_json(input: &str) -> Result<Validation, CliError> {
    let candidate: serde_json::Value = serde_json::from_str(input)?;
    Ok(validate(&candidate))
}

#[cfg(test)]
mod tests {
    use codetabs_data::ValidationError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_valid_data() {
        let validation = validate_json(r#"{"active": 0, "tabs": [{"title": "A", "lang": "js", "code": "x"}]}"#).unwrap();
        assert!(validation.is_ok());
    }

    #[test]
    fn test_every_problem_reported() {
        let validation = validate_json(r#"{"active": 0, "tabs": [{"title": "", "lang": "js", "code": ""}]}"#).unwrap();
        assert_eq!(
            validation.errors,
            vec![
                ValidationError::EmptyTitle { index: 0 },
                ValidationError::EmptyCode { index: 0 },
            ]
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(validate_json("[1,"), Err(CliError::Json(_))));
    }
}
