use thiserror::Error;
use serde::Serialize;

use crate::shared::errors::{ConversionError, ErrorKind};

#[derive(Error, Debug, Serialize)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Calculation Error: {0}")]
    Calculation(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl AppError {
    /// User-facing text without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            AppError::Io(msg)
            | AppError::Calculation(msg)
            | AppError::Validation(msg)
            | AppError::Config(msg) => msg,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

// Parse failures are the caller's fault, everything else is a calculation problem
impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err.kind() {
            ErrorKind::Parse => AppError::Validation(err.to_string()),
            ErrorKind::Unsupported | ErrorKind::Unexpected => AppError::Calculation(err.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
