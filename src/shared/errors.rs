//! Conversion errors with a fixed user-facing vocabulary
//!
//! The engine never hands back a bare `String` for failures. Every failure is a
//! `ConversionError` whose `Display` text is exactly what the widget shows in place
//! of the result, so callers can either branch on the variant or just render it.

use serde::Serialize;
use thiserror::Error;

pub const ERR_INVALID_NUMBER: &str = "Please enter a valid number";
pub const ERR_UNSUPPORTED_CONVERSION: &str = "Conversion not supported";
pub const ERR_NON_FINITE_RESULT: &str = "result is not a finite number";

/// Coarse error taxonomy shown to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Raw input was not a finite real number
    Parse,
    /// Category, unit or factor lookup failed
    Unsupported,
    /// Anything else that went wrong while computing
    Unexpected,
}

/// Failure of a single conversion request.
///
/// All variants are recoverable and are displayed in place of the result.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConversionError {
    /// Input text is empty, non-numeric, NaN or infinite
    #[error("{}", ERR_INVALID_NUMBER)]
    InvalidNumber,

    /// A unit exists but carries no usable factor for this category
    #[error("{}", ERR_UNSUPPORTED_CONVERSION)]
    UnsupportedConversion,

    /// Category name is not part of the table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unit name is not part of the category's unit list
    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { category: String, unit: String },

    /// Free text did not contain a recognisable quantity
    #[error("Could not parse unit from text: {0}")]
    UnparsableQuantity(String),

    /// Any other failure, cause appended to a generic prefix
    #[error("Error: {0}")]
    Unexpected(String),
}

impl ConversionError {
    pub fn unknown_unit(category: impl ToString, unit: impl Into<String>) -> Self {
        ConversionError::UnknownUnit {
            category: category.to_string(),
            unit: unit.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidNumber | ConversionError::UnparsableQuantity(_) => ErrorKind::Parse,
            ConversionError::UnsupportedConversion
            | ConversionError::UnknownCategory(_)
            | ConversionError::UnknownUnit { .. } => ErrorKind::Unsupported,
            ConversionError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

pub type ConversionResult<T> = Result<T, ConversionError>;
