//! Converter command module
//!
//! Thin adapters from request DTOs to the conversion engine and the unit registry.

use tracing::debug;

use crate::core::converter::format::FormatOptions;
use crate::core::converter::parsing::parse_quantity;
use crate::core::converter::registry::{all_units, first_units, unit_names, Category, CategoryTable};
use crate::core::converter::{convert_request, ConversionRequest};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{
    CategoryDTO, ConvertUnitsRequest, ConvertUnitsResponse, GetUnitsResponse, ParseUnitResponse, UnitDTO,
};

/// Convert units using the registry
pub fn convert_units_command(request: ConvertUnitsRequest) -> AppResult<ConvertUnitsResponse> {
    convert_units_with(request, &FormatOptions::default())
}

pub fn convert_units_with(request: ConvertUnitsRequest, options: &FormatOptions) -> AppResult<ConvertUnitsResponse> {
    let category = request
        .category
        .parse::<Category>()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let conversion = ConversionRequest::new(category, request.from_unit, request.to_unit, request.input);
    let outcome = convert_request(&conversion, options)?;

    Ok(ConvertUnitsResponse {
        result: outcome.value,
        formatted_result: outcome.formatted,
        display: outcome.display,
        from_unit: conversion.from_unit,
        to_unit: conversion.to_unit,
    })
}

/// Get all available units from the registry
/// Returns a list of UnitDTO objects for frontend consumption, in table order
pub fn get_all_units_command() -> AppResult<GetUnitsResponse> {
    let units = all_units()
        .into_iter()
        .map(|(category, def)| {
            let (factor, tag) = match category.table() {
                CategoryTable::Linear(table) => (
                    table.units.iter().find(|u| u.def.name == def.name).map(|u| u.factor),
                    None,
                ),
                CategoryTable::Affine(table) => (
                    None,
                    table.units.iter().find(|u| u.def.name == def.name).map(|u| u.tag),
                ),
            };
            UnitDTO {
                id: def.name.to_string(),
                symbol: def.symbol.to_string(),
                category,
                factor,
                tag,
            }
        })
        .collect();

    Ok(GetUnitsResponse { units })
}

/// Categories with their unit lists and the units selected after switching to them
pub fn get_categories_command() -> AppResult<Vec<CategoryDTO>> {
    Ok(Category::ALL
        .into_iter()
        .map(|category| {
            let (default_from_unit, default_to_unit) = first_units(category);
            CategoryDTO {
                id: category,
                label: category.label().to_string(),
                default_from_unit: default_from_unit.to_string(),
                default_to_unit: default_to_unit.to_string(),
                units: unit_names(category).into_iter().map(String::from).collect(),
            }
        })
        .collect())
}

/// Parse text input and extract amount, unit, and category
pub fn parse_text_command(text: String) -> AppResult<ParseUnitResponse> {
    let parsed = parse_quantity(&text)?;
    debug!(text = %text, unit = parsed.unit, "parse_text_command");

    Ok(ParseUnitResponse {
        amount: parsed.amount,
        unit: parsed.unit.to_string(),
        category: parsed.category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(category: &str, from: &str, to: &str, input: &str) -> ConvertUnitsRequest {
        ConvertUnitsRequest {
            category: category.to_string(),
            from_unit: from.to_string(),
            to_unit: to.to_string(),
            input: input.to_string(),
        }
    }

    #[test]
    fn test_convert_units_command() {
        let response = convert_units_command(request("length", "Mile", "Kilometer", "1")).unwrap();
        assert!((response.result - 1.609344).abs() < 1e-6);
        assert_eq!(response.formatted_result, "1.609344");
        assert_eq!(response.display, "1.609344 Kilometer");
        assert_eq!(response.from_unit, "Mile");
        assert_eq!(response.to_unit, "Kilometer");
    }

    #[test]
    fn test_convert_units_invalid_input_is_validation_error() {
        let err = convert_units_command(request("length", "Meter", "Foot", "abc")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.message(), "Please enter a valid number");
    }

    #[test]
    fn test_convert_units_unknown_category() {
        let err = convert_units_command(request("speed", "Meter", "Foot", "1")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_convert_units_unknown_unit_is_calculation_error() {
        let err = convert_units_command(request("weight", "Kilogram", "Stone", "1")).unwrap_err();
        assert!(matches!(err, AppError::Calculation(_)));
    }

    #[test]
    fn test_get_all_units_command() {
        let response = get_all_units_command().unwrap();
        assert_eq!(response.units.len(), 38);

        let meter = &response.units[0];
        assert_eq!(meter.id, "Meter");
        assert_eq!(meter.symbol, "m");
        assert_eq!(meter.factor, Some(1.0));
        assert!(meter.tag.is_none());

        let kelvin = response.units.iter().find(|u| u.id == "Kelvin").unwrap();
        assert_eq!(kelvin.category, Category::Temperature);
        assert!(kelvin.factor.is_none());
        assert_eq!(kelvin.tag, Some(crate::core::converter::registry::TemperatureTag::K));
    }

    #[test]
    fn test_get_categories_command() {
        let categories = get_categories_command().unwrap();
        let ids: Vec<_> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, Category::ALL.to_vec());
        assert_eq!(categories[1].label, "Weight");
        assert_eq!(categories[1].default_from_unit, "Kilogram");
        assert_eq!(categories[1].default_to_unit, "Gram");
        assert_eq!(categories[2].units, vec!["Celsius", "Fahrenheit", "Kelvin"]);
    }

    #[test]
    fn test_parse_text_command() {
        let response = parse_text_command("12 miles".to_string()).unwrap();
        assert_eq!(response.amount, 12.0);
        assert_eq!(response.unit, "Mile");
        assert_eq!(response.category, Category::Length);

        assert!(matches!(
            parse_text_command("nothing here".to_string()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_response_serializes_snake_case() {
        let response = convert_units_command(request("temperature", "Celsius", "Kelvin", "0")).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["display"], "273.15 Kelvin");
        assert_eq!(json["formatted_result"], "273.15");
    }
}
