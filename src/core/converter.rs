//! Conversion engine
//!
//! Pure functions over the immutable unit registry. A conversion goes through the
//! category's reference scale: `value -> base -> target`. Linear categories use a
//! single factor per unit, temperature uses an affine `(scale, offset)` pair.

pub mod format;
pub mod parsing;
pub mod registry;
pub mod selection;

#[cfg(test)]
mod proptests;

use tracing::debug;

use crate::shared::errors::{ConversionError, ConversionResult, ERR_NON_FINITE_RESULT};
use format::{format_value_with, FormatOptions};
use parsing::parse_number;
use registry::{Category, UnitScale};

/// One user interaction, consumed immediately by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub raw_input: String,
}

impl ConversionRequest {
    pub fn new(
        category: Category,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        raw_input: impl Into<String>,
    ) -> Self {
        Self {
            category,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            raw_input: raw_input.into(),
        }
    }
}

/// Successful conversion in all the shapes the front-end needs
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub value: f64,
    /// Number only, e.g. `1.609344`
    pub formatted: String,
    /// Number, one space, target unit name, e.g. `1.609344 Kilometer`
    pub display: String,
}

/// Convert raw widget input and render it for display.
///
/// Returns e.g. `"1.609344 Kilometer"` or the error to show in its place.
pub fn convert(category: Category, from_unit: &str, to_unit: &str, raw_input: &str) -> ConversionResult<String> {
    convert_with(category, from_unit, to_unit, raw_input, &FormatOptions::default())
}

pub fn convert_with(
    category: Category,
    from_unit: &str,
    to_unit: &str,
    raw_input: &str,
    options: &FormatOptions,
) -> ConversionResult<String> {
    let value = parse_number(raw_input)?;
    let result = convert_value(category, from_unit, to_unit, value)?;
    Ok(format!("{} {}", format_value_with(result, options), to_unit))
}

pub fn convert_request(request: &ConversionRequest, options: &FormatOptions) -> ConversionResult<ConversionOutcome> {
    let value = parse_number(&request.raw_input)?;
    let result = convert_value(request.category, &request.from_unit, &request.to_unit, value)?;
    let formatted = format_value_with(result, options);
    let display = format!("{} {}", formatted, request.to_unit);

    Ok(ConversionOutcome {
        value: result,
        formatted,
        display,
    })
}

/// Numeric core: no parsing, no formatting.
///
/// Converting a unit to itself returns `value` untouched once both names are known
/// to belong to the category.
pub fn convert_value(category: Category, from_unit: &str, to_unit: &str, value: f64) -> ConversionResult<f64> {
    let table = category.table();

    if !table.contains(from_unit) {
        return Err(ConversionError::unknown_unit(category, from_unit));
    }
    if !table.contains(to_unit) {
        return Err(ConversionError::unknown_unit(category, to_unit));
    }

    if from_unit == to_unit {
        return Ok(value);
    }

    let base = table.to_base(from_unit, value)?;
    let result = table.from_base(to_unit, base)?;

    debug!(%category, from_unit, to_unit, value, base, result, "converted value");

    if !result.is_finite() {
        return Err(ConversionError::Unexpected(ERR_NON_FINITE_RESULT.to_string()));
    }
    Ok(result)
}
