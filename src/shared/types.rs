use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::converter::registry::{Category, TemperatureTag};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct ConvertUnitsRequest {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    /// Raw text from the input box, parsed by the engine
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct ConvertUnitsResponse {
    pub result: f64,
    pub formatted_result: String,
    /// Result followed by the target unit name, ready to display
    pub display: String,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct ParseUnitResponse {
    pub amount: f64,
    pub unit: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct GetUnitsResponse {
    pub units: Vec<UnitDTO>,
}

// Rich Unit Data Transfer Object for frontend
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct UnitDTO {
    pub id: String,      // Unit display name, also the key in requests (e.g., "Gallon (US)")
    pub symbol: String,  // Short symbol (e.g., "m", "gal")
    pub category: Category,
    /// Ratio from the category's base unit, absent for temperature
    pub factor: Option<f64>,
    /// Scale tag, present only for temperature
    pub tag: Option<TemperatureTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub struct CategoryDTO {
    pub id: Category,
    pub label: String,
    pub default_from_unit: String,
    pub default_to_unit: String,
    pub units: Vec<String>,
}
