//! Pre-save validation of candidate tab data.
//!
//! Validation looks at the raw candidate (as produced by an editing form or a
//! decoded payload) and reports every problem without repairing anything, so
//! the editor can point at exactly what is wrong before saving.

use serde_json::Value;

use crate::model::TabsData;

/// A single validation problem.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The candidate is not a JSON object.
    #[error("tab data must be an object")]
    NotAnObject,
    /// The candidate has no tabs.
    #[error("at least one tab is required")]
    NoTabs,
    /// A tab has an empty or missing title.
    #[error("tab {}: title is empty", .index + 1)]
    EmptyTitle { index: usize },
    /// A tab has an empty or missing language.
    #[error("tab {}: language is empty", .index + 1)]
    EmptyLanguage { index: usize },
    /// A tab has empty or missing code.
    #[error("tab {}: code is empty", .index + 1)]
    EmptyCode { index: usize },
    /// The active index is not an integer.
    #[error("active tab must be an integer index")]
    ActiveNotAnIndex,
    /// The active index points outside the tab list.
    #[error("active tab {active} is out of range for {len} tab(s)")]
    ActiveOutOfRange { active: i64, len: usize },
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    /// Problems found, in document order.
    pub errors: Vec<ValidationError>,
}

impl Validation {
    /// Whether the candidate passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a raw candidate.
///
/// # Example
///
/// ```
/// use codetabs_data::{ValidationError, validate};
/// use serde_json::json;
///
/// let result = validate(&json!({"active": 3, "tabs": [{"title": "A", "lang": "js", "code": ""}]}));
/// assert_eq!(
///     result.errors,
///     vec![
///         ValidationError::EmptyCode { index: 0 },
///         ValidationError::ActiveOutOfRange { active: 3, len: 1 },
///     ]
/// );
/// ```
pub fn validate(candidate: &Value) -> Validation {
    let Some(object) = candidate.as_object() else {
        return Validation {
            errors: vec![ValidationError::NotAnObject],
        };
    };

    let mut errors = Vec::new();
    let tabs = object
        .get("tabs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if tabs.is_empty() {
        errors.push(ValidationError::NoTabs);
        return Validation { errors };
    }

    for (index, tab) in tabs.iter().enumerate() {
        if is_blank(tab.get("title")) {
            errors.push(ValidationError::EmptyTitle { index });
        }
        if is_blank(tab.get("lang")) {
            errors.push(ValidationError::EmptyLanguage { index });
        }
        if is_blank(tab.get("code")) {
            errors.push(ValidationError::EmptyCode { index });
        }
    }

    match object.get("active") {
        None | Some(Value::Null) => {}
        Some(value) => match value.as_i64() {
            Some(active) if usize::try_from(active).is_ok_and(|a| a < tabs.len()) => {}
            Some(active) => errors.push(ValidationError::ActiveOutOfRange {
                active,
                len: tabs.len(),
            }),
            None => errors.push(ValidationError::ActiveNotAnIndex),
        },
    }

    Validation { errors }
}

fn is_blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_none_or(|s| s.trim().is_empty())
}

impl TabsData {
    /// Validate typed data through the same rules as a raw candidate.
    #[must_use]
    pub fn validate(&self) -> Validation {
        match serde_json::to_value(self) {
            Ok(value) => validate(&value),
            Err(_) => Validation {
                errors: vec![ValidationError::NotAnObject],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::TabItem;

    #[test]
    fn test_non_object_is_single_error() {
        for candidate in [json!(null), json!([1, 2]), json!("tabs"), json!(3)] {
            assert_eq!(validate(&candidate).errors, vec![ValidationError::NotAnObject]);
        }
    }

    #[test]
    fn test_missing_or_empty_tabs() {
        assert_eq!(validate(&json!({})).errors, vec![ValidationError::NoTabs]);
        assert_eq!(
            validate(&json!({"tabs": [], "active": 0})).errors,
            vec![ValidationError::NoTabs]
        );
    }

    #[test]
    fn test_each_empty_field_reported_separately() {
        let result = validate(&json!({
            "active": 0,
            "tabs": [
                {"title": "A", "lang": "js", "code": "x"},
                {"title": "  ", "lang": "", "code": "\n"},
                {"title": "C"}
            ]
        }));

        assert_eq!(
            result.errors,
            vec![
                ValidationError::EmptyTitle { index: 1 },
                ValidationError::EmptyLanguage { index: 1 },
                ValidationError::EmptyCode { index: 1 },
                ValidationError::EmptyLanguage { index: 2 },
                ValidationError::EmptyCode { index: 2 },
            ]
        );
    }

    #[test]
    fn test_active_out_of_range_reported_not_repaired() {
        let candidate = json!({"active": -1, "tabs": [{"title": "A", "lang": "js", "code": "x"}]});
        assert_eq!(
            validate(&candidate).errors,
            vec![ValidationError::ActiveOutOfRange { active: -1, len: 1 }]
        );
        assert_eq!(candidate["active"], json!(-1));
    }

    #[test]
    fn test_active_not_an_index() {
        let candidate = json!({"active": "first", "tabs": [{"title": "A", "lang": "js", "code": "x"}]});
        assert_eq!(validate(&candidate).errors, vec![ValidationError::ActiveNotAnIndex]);
    }

    #[test]
    fn test_valid_candidate() {
        let candidate = json!({"version": 1, "active": 1, "tabs": [
            {"title": "A", "lang": "js", "code": "x"},
            {"title": "B", "lang": "plaintext", "code": "y"}
        ]});
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_typed_validation() {
        let data = TabsData {
            version: 1,
            active: 0,
            tabs: vec![TabItem::new("A", "js", "")],
        };
        assert_eq!(data.validate().errors, vec![ValidationError::EmptyCode { index: 0 }]);
        assert!(TabsData::create_default(1).validate().is_ok());
    }

    #[test]
    fn test_error_messages_are_one_based() {
        assert_eq!(
            ValidationError::EmptyTitle { index: 0 }.to_string(),
            "tab 1: title is empty"
        );
    }
}
