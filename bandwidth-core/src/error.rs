//! Structured input errors
//!
//! Errors are values returned from the parser. The `kind` tag is the stable
//! contract; messages are informational and may change.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const EMPTY: &str = "EMPTY";
    pub const FORMAT: &str = "FORMAT";
    pub const NEGATIVE: &str = "NEGATIVE";
    pub const FRACTIONAL_NOT_ALLOWED: &str = "FRACTIONAL_NOT_ALLOWED";
}

/// The closed taxonomy of input failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Input has no non-whitespace content
    Empty,
    /// Input is present but is not a decimal numeral
    Format,
    /// Input parses but is below zero
    Negative,
    /// Input has a fractional part but the unit is integer-only
    FractionalNotAllowed,
}

impl ErrorKind {
    /// Upper-case code from [`codes`]
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Empty => codes::EMPTY,
            ErrorKind::Format => codes::FORMAT,
            ErrorKind::Negative => codes::NEGATIVE,
            ErrorKind::FractionalNotAllowed => codes::FRACTIONAL_NOT_ALLOWED,
        }
    }

    /// Kebab-case tag, identical to the serialized form
    pub fn tag(self) -> &'static str {
        match self {
            ErrorKind::Empty => "empty",
            ErrorKind::Format => "format",
            ErrorKind::Negative => "negative",
            ErrorKind::FractionalNotAllowed => "fractional-not-allowed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validation error with a stable kind and a human-readable message
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct InputError {
    /// Machine-readable kind
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the input
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl InputError {
    /// Create a new error
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn empty() -> Self {
        Self::new(ErrorKind::Empty, "Empty value")
            .with_suggestion("Enter a number")
    }

    pub fn format(input: &str) -> Self {
        Self::new(ErrorKind::Format, format!("Invalid number format: {}", input))
            .with_suggestion("Use digits with an optional '.' or ',' decimal separator")
    }

    pub fn negative(value: f64) -> Self {
        Self::new(ErrorKind::Negative, format!("Value cannot be negative: {}", value))
    }

    pub fn fractional_not_allowed(unit: &str) -> Self {
        Self::new(
            ErrorKind::FractionalNotAllowed,
            format!("{} must be a whole number", unit),
        )
        .with_suggestion("Remove the fractional part")
    }
}
