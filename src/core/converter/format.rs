//! Result formatting
//!
//! Magnitudes inside `[scientific_below, scientific_above]` render in fixed notation
//! with trailing zeros stripped; everything else renders in scientific notation with
//! a signed, two-digit exponent (`1.234500e+08`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Digits beyond this carry no information for an f64
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings.ts")]
pub struct FormatOptions {
    /// Fractional digits in both notations, capped at `MAX_PRECISION`
    #[ts(type = "number")]
    pub precision: usize,
    /// Magnitudes strictly below this switch to scientific notation
    pub scientific_below: f64,
    /// Magnitudes strictly above this switch to scientific notation
    pub scientific_above: f64,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 6,
            scientific_below: 1e-6,
            scientific_above: 1e6,
        }
    }
}

pub fn format_value(value: f64) -> String {
    format_value_with(value, &FormatOptions::default())
}

pub fn format_value_with(value: f64, options: &FormatOptions) -> String {
    let precision = options.precision.min(MAX_PRECISION);
    let magnitude = value.abs();
    if magnitude < options.scientific_below || magnitude > options.scientific_above {
        format_scientific(value, precision)
    } else {
        format_fixed(value, precision)
    }
}

/// Number followed by a single space and the unit's display name
pub fn format_display(value: f64, unit: &str) -> String {
    format!("{} {}", format_value(value), unit)
}

pub fn format_display_with(value: f64, unit: &str, options: &FormatOptions) -> String {
    format!("{} {}", format_value_with(value, options), unit)
}

fn format_fixed(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

// Rust renders `1.2345e8`; widen the exponent to `e+08`
fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}
