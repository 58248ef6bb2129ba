//! Validation results, pattern predicates and validator constructors.
//!
//! A validator is a function from a control (or group) to a
//! [`ValidationResult`]. Validators are attached to the form tree and
//! re-run every time validity is queried.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::constants::{
    EMAIL_PATTERN, ERROR_CUSTOM, ERROR_MAX_LENGTH, ERROR_MIN_LENGTH, ERROR_PATTERN,
    ERROR_REQUIRED, FIELD_PASSWORD, FIELD_PASSWORD_CONFIRM, PASSWORDS_MISMATCH_MESSAGE,
    PHONE_MESSAGE, PHONE_PATTERN, USER_NAME_MESSAGE, USER_NAME_PATTERN,
};
use crate::form::NodeRef;

static USER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(USER_NAME_PATTERN).expect("user name pattern compiles"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

// =============================================================================
// Results
// =============================================================================

/// Diagnostic payload attached to an error key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorDetail {
    Required,
    MinLength {
        required_length: usize,
        actual_length: usize,
    },
    MaxLength {
        required_length: usize,
        actual_length: usize,
    },
    Pattern {
        required_pattern: String,
        actual_value: String,
    },
    Message(String),
}

impl ErrorDetail {
    /// Human readable description of the error.
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Required => "This field is required".to_string(),
            ErrorDetail::MinLength {
                required_length, ..
            } => format!("Must be at least {} characters", required_length),
            ErrorDetail::MaxLength {
                required_length, ..
            } => format!("Must be at most {} characters", required_length),
            ErrorDetail::Pattern { .. } => "Invalid format".to_string(),
            ErrorDetail::Message(msg) => msg.clone(),
        }
    }
}

/// Mapping from error key to diagnostic payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, ErrorDetail>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding exactly one key.
    pub fn single(key: impl Into<String>, detail: ErrorDetail) -> Self {
        let mut errors = Self::new();
        errors.insert(key, detail);
        errors
    }

    pub fn insert(&mut self, key: impl Into<String>, detail: ErrorDetail) {
        self.0.insert(key.into(), detail);
    }

    pub fn get(&self, key: &str) -> Option<&ErrorDetail> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorDetail)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge another set of errors into this one. Later keys win.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

/// `Ok(())` when valid, otherwise the keyed errors.
pub type ValidationResult = Result<(), ValidationErrors>;

/// A validator attached to a control or group.
pub type ValidatorFn = Arc<dyn Fn(NodeRef<'_>) -> ValidationResult + Send + Sync>;

/// Run every validator and merge their errors.
pub fn run_validators(validators: &[ValidatorFn], node: NodeRef<'_>) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    for validator in validators {
        if let Err(e) = validator(node) {
            errors.merge(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Pattern predicates
// =============================================================================

pub fn is_valid_user_name(value: &str) -> bool {
    USER_NAME_REGEX.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

// =============================================================================
// Built-in validators
// =============================================================================

/// Fails on an empty control value.
pub fn required() -> ValidatorFn {
    Arc::new(|node: NodeRef<'_>| match node.value_str() {
        Some("") => Err(ValidationErrors::single(ERROR_REQUIRED, ErrorDetail::Required)),
        _ => Ok(()),
    })
}

/// Fails when a non-empty value is shorter than `min` characters.
pub fn min_length(min: usize) -> ValidatorFn {
    Arc::new(move |node: NodeRef<'_>| {
        let Some(value) = node.value_str().filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        let actual_length = value.chars().count();
        if actual_length < min {
            Err(ValidationErrors::single(
                ERROR_MIN_LENGTH,
                ErrorDetail::MinLength {
                    required_length: min,
                    actual_length,
                },
            ))
        } else {
            Ok(())
        }
    })
}

/// Fails when a value is longer than `max` characters.
pub fn max_length(max: usize) -> ValidatorFn {
    Arc::new(move |node: NodeRef<'_>| {
        let Some(value) = node.value_str() else {
            return Ok(());
        };
        let actual_length = value.chars().count();
        if actual_length > max {
            Err(ValidationErrors::single(
                ERROR_MAX_LENGTH,
                ErrorDetail::MaxLength {
                    required_length: max,
                    actual_length,
                },
            ))
        } else {
            Ok(())
        }
    })
}

/// Fails when a non-empty value does not match `regex`.
pub fn pattern(regex: &Regex) -> ValidatorFn {
    let regex = regex.clone();
    Arc::new(move |node: NodeRef<'_>| {
        let Some(value) = node.value_str().filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        if regex.is_match(value) {
            Ok(())
        } else {
            Err(ValidationErrors::single(
                ERROR_PATTERN,
                ErrorDetail::Pattern {
                    required_pattern: regex.as_str().to_string(),
                    actual_value: value.to_string(),
                },
            ))
        }
    })
}

/// Email pattern validator using the shared email expression.
pub fn email() -> ValidatorFn {
    pattern(&EMAIL_REGEX)
}

/// User name rule. Silent until the control has been interacted with.
pub fn user_name() -> ValidatorFn {
    interacted_pattern(is_valid_user_name, USER_NAME_MESSAGE)
}

/// Phone number rule. Silent until the control has been interacted with.
pub fn phone() -> ValidatorFn {
    interacted_pattern(is_valid_phone, PHONE_MESSAGE)
}

fn interacted_pattern(predicate: fn(&str) -> bool, message: &'static str) -> ValidatorFn {
    Arc::new(move |node: NodeRef<'_>| {
        if node.is_pristine() {
            return Ok(());
        }
        match node.value_str() {
            Some(value) if !predicate(value) => Err(ValidationErrors::single(
                ERROR_CUSTOM,
                ErrorDetail::Message(message.to_string()),
            )),
            _ => Ok(()),
        }
    })
}

/// Group rule: `password` and `passwordConfirm` must be equal once the
/// group has been interacted with.
pub fn passwords_are_equal() -> ValidatorFn {
    Arc::new(|node: NodeRef<'_>| {
        let NodeRef::Group(group) = node else {
            return Ok(());
        };
        if node.is_pristine() {
            return Ok(());
        }

        let password = group.get(FIELD_PASSWORD).and_then(|n| n.node_ref().value_str());
        let confirm = group
            .get(FIELD_PASSWORD_CONFIRM)
            .and_then(|n| n.node_ref().value_str());

        if password == confirm {
            Ok(())
        } else {
            Err(ValidationErrors::single(
                ERROR_CUSTOM,
                ErrorDetail::Message(PASSWORDS_MISMATCH_MESSAGE.to_string()),
            ))
        }
    })
}
