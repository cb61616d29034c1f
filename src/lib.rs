//! Unit converter widget core
//!
//! Static unit registry, a pure conversion engine and the selection policy that keeps
//! the widget's source and target units apart. The presentation layer owns all UI
//! state and calls in through `api::commands` or the re-exports below.

pub mod api;
pub mod core;
pub mod shared;

mod cli;

pub use crate::core::converter::format::{format_display, format_value, FormatOptions};
pub use crate::core::converter::parsing::{parse_number, parse_quantity, ParsedQuantity};
pub use crate::core::converter::registry::{all_units, lookup, unit_names, Category, TemperatureTag, UnitDefinition};
pub use crate::core::converter::selection::ConverterState;
pub use crate::core::converter::{convert, convert_request, convert_value, ConversionOutcome, ConversionRequest};
pub use crate::shared::errors::{ConversionError, ConversionResult, ErrorKind};
pub use crate::shared::settings::ConverterSettings;

pub use cli::run;
