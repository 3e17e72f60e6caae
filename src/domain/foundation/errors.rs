//! Error vocabulary shared across the domain.
//!
//! `ValidationError` covers value objects that refuse a raw input.
//! `DomainError` is the flattened form handed to callers outside the
//! crate: a stable code, a readable message and key/value context.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A raw value was rejected while building a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("'{field}' must lie in {min}..={max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        actual: u8,
    },
}

impl ValidationError {
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }

    pub fn out_of_range(field: &'static str, min: u8, max: u8, actual: u8) -> Self {
        ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        }
    }
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidValue,
    ConfigurationInvalid,
    UnknownEntity,
    NoActiveCategory,
    AssessmentNotFound,
    StorageFailure,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::ConfigurationInvalid => "CONFIGURATION_INVALID",
            ErrorCode::UnknownEntity => "UNKNOWN_ENTITY",
            ErrorCode::NoActiveCategory => "NO_ACTIVE_CATEGORY",
            ErrorCode::AssessmentNotFound => "ASSESSMENT_NOT_FOUND",
            ErrorCode::StorageFailure => "STORAGE_FAILURE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened error for callers outside the domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Attaches a context entry, replacing any earlier value under `key`.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } | ValidationError::OutOfRange { field, .. } => *field,
        };
        DomainError::new(ErrorCode::InvalidValue, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_bounds() {
        let err = ValidationError::out_of_range("level", 1, 5, 7);
        assert_eq!(err.to_string(), "'level' must lie in 1..=5, got 7");
    }

    #[test]
    fn domain_error_prefixes_code() {
        let err = DomainError::new(ErrorCode::NoActiveCategory, "nothing to evaluate");
        assert_eq!(err.to_string(), "[NO_ACTIVE_CATEGORY] nothing to evaluate");
    }

    #[test]
    fn validation_error_keeps_field_as_detail() {
        let err: DomainError = ValidationError::empty_field("selection_prompt").into();
        assert_eq!(err.code, ErrorCode::InvalidValue);
        assert_eq!(err.details.get("field").map(String::as_str), Some("selection_prompt"));
    }

    #[test]
    fn later_detail_replaces_earlier() {
        let err = DomainError::new(ErrorCode::UnknownEntity, "missing")
            .with_detail("category", "Pumpen")
            .with_detail("category", "Instandhaltung Rohrnetz");
        assert_eq!(err.details.len(), 1);
        assert_eq!(err.details["category"], "Instandhaltung Rohrnetz");
    }
}
