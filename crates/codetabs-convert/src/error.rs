//! Errors of single-item operations.

use codetabs_data::ValidationError;
use codetabs_host::{BlockId, HostError};

/// Error from an edit session or widget insertion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The host call failed.
    #[error(transparent)]
    Host(#[from] HostError),
    /// The block carries no readable tab data.
    #[error("block {0} is not a tabs widget")]
    NotAWidget(BlockId),
    /// The data failed validation and was not saved.
    #[error("invalid tab data: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_lists_every_error() {
        let err = ConvertError::Invalid(vec![
            ValidationError::EmptyTitle { index: 0 },
            ValidationError::EmptyCode { index: 1 },
        ]);
        assert_eq!(
            err.to_string(),
            "invalid tab data: tab 1: title is empty; tab 2: code is empty"
        );
    }
}
