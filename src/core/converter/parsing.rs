use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::registry::{all_units, Category};
use crate::shared::errors::{ConversionError, ConversionResult};

/// Amount and unit pulled out of free text such as "12 km" or "lb 3.5"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedQuantity {
    pub amount: f64,
    pub category: Category,
    pub unit: &'static str,
}

// Compiled once; the pattern is a constant so expect cannot fire at runtime
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Failed to compile number pattern")
});

/// Lower-cased spelling -> unit, longest spelling first so "fl oz" wins over "oz"
static ALIAS_INDEX: Lazy<Vec<(String, Category, &'static str)>> = Lazy::new(|| {
    let mut index: Vec<(String, Category, &'static str)> = all_units()
        .into_iter()
        .flat_map(|(category, def)| {
            std::iter::once(def.name)
                .chain(std::iter::once(def.symbol))
                .chain(def.aliases.iter().copied())
                .map(move |spelling| (spelling.to_lowercase(), category, def.name))
        })
        .collect();
    index.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    index
});

/// Parse widget input as a finite real number.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text, `NaN` and
/// infinities are all rejected with `InvalidNumber`.
pub fn parse_number(raw: &str) -> ConversionResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::InvalidNumber);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::InvalidNumber),
    }
}

/// Find the first "number unit" or "unit number" pair in `text`.
///
/// A comma is always read as a decimal separator, so "2,5 l" is 2.5 liters and
/// "1,000 m" is 1 meter; thousands separators are not supported. Digits glued to
/// letters on their left belong to a unit spelling ("m2", "cm3") and never start
/// an amount.
pub fn parse_quantity(text: &str) -> ConversionResult<ParsedQuantity> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::UnparsableQuantity(text.to_string()));
    }

    let normalized = trimmed.replace(',', ".").to_lowercase();

    for number in NUMBER_RE.find_iter(&normalized) {
        let Ok(amount) = number.as_str().parse::<f64>() else {
            continue;
        };
        if !amount.is_finite() {
            continue;
        }

        let before = &normalized[..number.start()];
        if before.ends_with(|c: char| c.is_alphanumeric()) {
            continue;
        }

        let after = normalized[number.end()..].trim_start();
        let before = before.trim_end();

        if let Some((category, unit)) = unit_prefix(after).or_else(|| unit_suffix(before)) {
            debug!(amount, unit, %category, "parsed quantity from text");
            return Ok(ParsedQuantity { amount, category, unit });
        }
    }

    debug!(text = trimmed, "no quantity found in text");
    Err(ConversionError::UnparsableQuantity(trimmed.to_string()))
}

/// Resolve a single unit spelling ("km", "Kilometer", "kilometres") to its unit
pub fn resolve_unit(spelling: &str) -> Option<(Category, &'static str)> {
    let wanted = spelling.trim().to_lowercase();
    ALIAS_INDEX
        .iter()
        .find(|(alias, _, _)| *alias == wanted)
        .map(|(_, category, unit)| (*category, *unit))
}

fn unit_prefix(text: &str) -> Option<(Category, &'static str)> {
    ALIAS_INDEX
        .iter()
        .find(|(alias, _, _)| {
            text.strip_prefix(alias.as_str())
                .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
        })
        .map(|(_, category, unit)| (*category, *unit))
}

fn unit_suffix(text: &str) -> Option<(Category, &'static str)> {
    ALIAS_INDEX
        .iter()
        .find(|(alias, _, _)| {
            text.strip_suffix(alias.as_str())
                .is_some_and(|rest| !rest.ends_with(|c: char| c.is_alphanumeric()))
        })
        .map(|(_, category, unit)| (*category, *unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_reals() {
        assert_eq!(parse_number("1").unwrap(), 1.0);
        assert_eq!(parse_number(" -2.5 ").unwrap(), -2.5);
        assert_eq!(parse_number("1e3").unwrap(), 1000.0);
        assert_eq!(parse_number(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        for raw in ["", "   ", "abc", "1.2.3", "NaN", "inf", "-infinity", "12 km"] {
            assert_eq!(
                parse_number(raw),
                Err(ConversionError::InvalidNumber),
                "expected '{}' to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_quantity_number_then_unit() {
        let parsed = parse_quantity("12 km").unwrap();
        assert_eq!(parsed.amount, 12.0);
        assert_eq!(parsed.category, Category::Length);
        assert_eq!(parsed.unit, "Kilometer");

        let parsed = parse_quantity("3.5 pounds").unwrap();
        assert_eq!(parsed.unit, "Pound");
        assert_eq!(parsed.category, Category::Weight);
    }

    #[test]
    fn test_parse_quantity_without_space() {
        let parsed = parse_quantity("100m").unwrap();
        assert_eq!(parsed.amount, 100.0);
        assert_eq!(parsed.unit, "Meter");

        let parsed = parse_quantity("-40°F").unwrap();
        assert_eq!(parsed.amount, -40.0);
        assert_eq!(parsed.unit, "Fahrenheit");
    }

    #[test]
    fn test_parse_quantity_unit_then_number() {
        let parsed = parse_quantity("lb 3").unwrap();
        assert_eq!(parsed.amount, 3.0);
        assert_eq!(parsed.unit, "Pound");
    }

    #[test]
    fn test_parse_quantity_unit_with_digit_then_number() {
        let parsed = parse_quantity("m2 50").unwrap();
        assert_eq!(parsed.amount, 50.0);
        assert_eq!(parsed.unit, "Square Meter");

        let parsed = parse_quantity("km2 3").unwrap();
        assert_eq!(parsed.amount, 3.0);
        assert_eq!(parsed.unit, "Square Kilometer");

        let parsed = parse_quantity("cm3 250").unwrap();
        assert_eq!(parsed.amount, 250.0);
        assert_eq!(parsed.category, Category::Volume);
        assert_eq!(parsed.unit, "Cubic Centimeter");

        let parsed = parse_quantity("50 m2").unwrap();
        assert_eq!(parsed.amount, 50.0);
        assert_eq!(parsed.unit, "Square Meter");
    }

    #[test]
    fn test_parse_quantity_comma_is_decimal_separator() {
        assert_eq!(parse_quantity("2,5 l").unwrap().amount, 2.5);
        assert_eq!(parse_quantity("1,000 meters").unwrap().amount, 1.0);
    }

    #[test]
    fn test_parse_quantity_prefers_longest_alias() {
        assert_eq!(parse_quantity("8 fl oz").unwrap().unit, "Fluid Ounce (US)");
        assert_eq!(parse_quantity("8 oz").unwrap().unit, "Ounce");
        assert_eq!(parse_quantity("2 square feet").unwrap().unit, "Square Foot");
        assert_eq!(parse_quantity("2 feet").unwrap().unit, "Foot");
    }

    #[test]
    fn test_parse_quantity_inside_sentence() {
        let parsed = parse_quantity("about 2,5 liters of water").unwrap();
        assert_eq!(parsed.amount, 2.5);
        assert_eq!(parsed.unit, "Liter");
    }

    #[test]
    fn test_parse_quantity_failures() {
        assert!(matches!(parse_quantity(""), Err(ConversionError::UnparsableQuantity(_))));
        assert!(matches!(parse_quantity("hello"), Err(ConversionError::UnparsableQuantity(_))));
        assert!(matches!(parse_quantity("42 widgets"), Err(ConversionError::UnparsableQuantity(_))));
    }

    #[test]
    fn test_resolve_unit() {
        assert_eq!(resolve_unit("km"), Some((Category::Length, "Kilometer")));
        assert_eq!(resolve_unit("Gallon (US)"), Some((Category::Volume, "Gallon (US)")));
        assert_eq!(resolve_unit("kelvin"), Some((Category::Temperature, "Kelvin")));
        assert_eq!(resolve_unit("parsec"), None);
    }
}
