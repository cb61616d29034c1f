pub mod types;
pub mod settings;
pub mod errors;
pub mod error;


// Re-export the engine's error types for convenience
pub use errors::{ConversionError, ConversionResult, ErrorKind};
