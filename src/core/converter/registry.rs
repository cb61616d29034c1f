//! Unit registry
//!
//! Immutable, process-wide table of categories and their units. Linear categories
//! store one factor per unit relative to the category's base unit (factor 1.0);
//! temperature stores a symbolic scale tag because its conversions are affine.
//! Both kinds sit behind `UnitScale` so the engine dispatches on the kind statically.

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::shared::errors::{ConversionError, ConversionResult};

/// Measurement dimension partitioning the unit vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings.ts")]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
}

impl Category {
    /// Display order used by the category tabs
    pub const ALL: [Category; 5] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Area,
        Category::Volume,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
            Category::Area => "area",
            Category::Volume => "volume",
        }
    }

    /// Human label for tabs ("Length", "Weight", ...)
    pub fn label(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
            Category::Area => "Area",
            Category::Volume => "Volume",
        }
    }

    pub fn table(self) -> &'static CategoryTable {
        match self {
            Category::Length => &LENGTH,
            Category::Weight => &WEIGHT,
            Category::Temperature => &TEMPERATURE,
            Category::Area => &AREA,
            Category::Volume => &VOLUME,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}

/// Name, short symbol and free-text aliases of a unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    pub name: &'static str,
    pub symbol: &'static str,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearUnit {
    pub def: UnitDefinition,
    /// Ratio from the base unit to this unit (base unit = 1.0)
    pub factor: f64,
}

/// Temperature scale tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings.ts")]
pub enum TemperatureTag {
    C,
    F,
    K,
}

impl TemperatureTag {
    /// `(scale, offset)` relative to Celsius: `celsius = (value + offset) * scale`
    pub fn affine(self) -> (f64, f64) {
        match self {
            TemperatureTag::C => (1.0, 0.0),
            TemperatureTag::F => (5.0 / 9.0, -32.0),
            TemperatureTag::K => (1.0, -273.15),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineUnit {
    pub def: UnitDefinition,
    pub tag: TemperatureTag,
}

/// Multiplicative category: every unit is a scale of the base unit
#[derive(Debug, Clone, Copy)]
pub struct LinearCategory {
    pub category: Category,
    pub units: &'static [LinearUnit],
}

/// Affine category: every unit is `a*x + b` of the zero-point scale
#[derive(Debug, Clone, Copy)]
pub struct AffineCategory {
    pub category: Category,
    pub units: &'static [AffineUnit],
}

/// How a category's units map to and from its shared reference scale
#[enum_dispatch]
pub trait UnitScale {
    fn category(&self) -> Category;

    /// Unit definitions in their defined order, for listings
    fn definitions(&self) -> Vec<&'static UnitDefinition>;

    /// Definition of the unit named exactly `unit`
    fn definition(&self, unit: &str) -> Option<&'static UnitDefinition>;

    /// Value expressed in `unit` -> value on the reference scale
    fn to_base(&self, unit: &str, value: f64) -> ConversionResult<f64>;

    /// Value on the reference scale -> value expressed in `unit`
    fn from_base(&self, unit: &str, base: f64) -> ConversionResult<f64>;

    fn contains(&self, unit: &str) -> bool {
        self.definition(unit).is_some()
    }
}

#[enum_dispatch(UnitScale)]
#[derive(Debug, Clone, Copy)]
pub enum CategoryTable {
    Linear(LinearCategory),
    Affine(AffineCategory),
}

impl LinearCategory {
    fn factor(&self, unit: &str) -> ConversionResult<f64> {
        let found = self
            .units
            .iter()
            .find(|u| u.def.name == unit)
            .ok_or_else(|| ConversionError::unknown_unit(self.category, unit))?;

        // A zero or non-finite factor cannot take part in the base-unit round trip
        if !found.factor.is_finite() || found.factor == 0.0 {
            return Err(ConversionError::UnsupportedConversion);
        }
        Ok(found.factor)
    }

    /// Unit whose factor is exactly 1.0
    pub fn base_unit(&self) -> Option<&'static LinearUnit> {
        self.units.iter().find(|u| u.factor == 1.0)
    }
}

impl UnitScale for LinearCategory {
    fn category(&self) -> Category {
        self.category
    }

    fn definitions(&self) -> Vec<&'static UnitDefinition> {
        self.units.iter().map(|u| &u.def).collect()
    }

    fn definition(&self, unit: &str) -> Option<&'static UnitDefinition> {
        self.units.iter().map(|u| &u.def).find(|d| d.name == unit)
    }

    fn to_base(&self, unit: &str, value: f64) -> ConversionResult<f64> {
        Ok(value / self.factor(unit)?)
    }

    fn from_base(&self, unit: &str, base: f64) -> ConversionResult<f64> {
        Ok(base * self.factor(unit)?)
    }
}

impl AffineCategory {
    fn tag(&self, unit: &str) -> ConversionResult<TemperatureTag> {
        self.units
            .iter()
            .find(|u| u.def.name == unit)
            .map(|u| u.tag)
            .ok_or_else(|| ConversionError::unknown_unit(self.category, unit))
    }
}

impl UnitScale for AffineCategory {
    fn category(&self) -> Category {
        self.category
    }

    fn definitions(&self) -> Vec<&'static UnitDefinition> {
        self.units.iter().map(|u| &u.def).collect()
    }

    fn definition(&self, unit: &str) -> Option<&'static UnitDefinition> {
        self.units.iter().map(|u| &u.def).find(|d| d.name == unit)
    }

    fn to_base(&self, unit: &str, value: f64) -> ConversionResult<f64> {
        let (scale, offset) = self.tag(unit)?.affine();
        Ok((value + offset) * scale)
    }

    fn from_base(&self, unit: &str, base: f64) -> ConversionResult<f64> {
        let (scale, offset) = self.tag(unit)?.affine();
        Ok(base / scale - offset)
    }
}

/// Unit names of a category in their defined order
pub fn unit_names(category: Category) -> Vec<&'static str> {
    category.table().definitions().iter().map(|d| d.name).collect()
}

pub fn lookup(category: Category, unit: &str) -> ConversionResult<&'static UnitDefinition> {
    category
        .table()
        .definition(unit)
        .ok_or_else(|| ConversionError::unknown_unit(category, unit))
}

/// First and second unit of a category, the defaults after a category switch
pub fn first_units(category: Category) -> (&'static str, &'static str) {
    let defs = category.table().definitions();
    (defs[0].name, defs[1].name)
}

/// Every unit of every category in table order
pub fn all_units() -> Vec<(Category, &'static UnitDefinition)> {
    Category::ALL
        .into_iter()
        .flat_map(|c| c.table().definitions().into_iter().map(move |d| (c, d)))
        .collect()
}

const fn unit(name: &'static str, symbol: &'static str, aliases: &'static [&'static str]) -> UnitDefinition {
    UnitDefinition { name, symbol, aliases }
}

const fn linear(def: UnitDefinition, factor: f64) -> LinearUnit {
    LinearUnit { def, factor }
}

// Length (base: meter)
static LENGTH_UNITS: [LinearUnit; 8] = [
    linear(unit("Meter", "m", &["meter", "meters", "metre", "metres"]), 1.0),
    linear(unit("Kilometer", "km", &["kilometer", "kilometers", "kilometre", "kilometres"]), 0.001),
    linear(unit("Centimeter", "cm", &["centimeter", "centimeters", "centimetre", "centimetres"]), 100.0),
    linear(unit("Millimeter", "mm", &["millimeter", "millimeters", "millimetre", "millimetres"]), 1000.0),
    linear(unit("Mile", "mi", &["mile", "miles"]), 0.000621371),
    linear(unit("Yard", "yd", &["yard", "yards"]), 1.09361),
    linear(unit("Foot", "ft", &["foot", "feet", "'"]), 3.28084),
    linear(unit("Inch", "in", &["inch", "inches", "\""]), 39.3701),
];

static LENGTH: CategoryTable = CategoryTable::Linear(LinearCategory {
    category: Category::Length,
    units: &LENGTH_UNITS,
});

// Weight (base: kilogram)
static WEIGHT_UNITS: [LinearUnit; 6] = [
    linear(unit("Kilogram", "kg", &["kilogram", "kilograms", "kilo", "kilos"]), 1.0),
    linear(unit("Gram", "g", &["gram", "grams"]), 1000.0),
    linear(unit("Milligram", "mg", &["milligram", "milligrams"]), 1_000_000.0),
    linear(unit("Metric Ton", "t", &["metric ton", "metric tons", "tonne", "tonnes"]), 0.001),
    linear(unit("Pound", "lb", &["lbs", "pound", "pounds"]), 2.20462),
    linear(unit("Ounce", "oz", &["ounce", "ounces"]), 35.274),
];

static WEIGHT: CategoryTable = CategoryTable::Linear(LinearCategory {
    category: Category::Weight,
    units: &WEIGHT_UNITS,
});

// Temperature (zero point: Celsius)
static TEMPERATURE_UNITS: [AffineUnit; 3] = [
    AffineUnit { def: unit("Celsius", "°C", &["c", "celsius", "°c", "degc"]), tag: TemperatureTag::C },
    AffineUnit { def: unit("Fahrenheit", "°F", &["f", "fahrenheit", "°f", "degf"]), tag: TemperatureTag::F },
    AffineUnit { def: unit("Kelvin", "K", &["k", "kelvin", "kelvins"]), tag: TemperatureTag::K },
];

static TEMPERATURE: CategoryTable = CategoryTable::Affine(AffineCategory {
    category: Category::Temperature,
    units: &TEMPERATURE_UNITS,
});

// Area (base: square meter)
static AREA_UNITS: [LinearUnit; 10] = [
    linear(unit("Square Meter", "m²", &["m2", "sqm", "square meter", "square meters", "square metre", "square metres"]), 1.0),
    linear(unit("Square Kilometer", "km²", &["km2", "square kilometer", "square kilometers", "square kilometre", "square kilometres"]), 0.000001),
    linear(unit("Square Centimeter", "cm²", &["cm2", "square centimeter", "square centimeters", "square centimetre", "square centimetres"]), 10000.0),
    linear(unit("Square Millimeter", "mm²", &["mm2", "square millimeter", "square millimeters", "square millimetre", "square millimetres"]), 1_000_000.0),
    linear(unit("Square Mile", "mi²", &["mi2", "sq mi", "square mile", "square miles"]), 3.861e-7),
    linear(unit("Square Yard", "yd²", &["yd2", "sq yd", "square yard", "square yards"]), 1.19599),
    linear(unit("Square Foot", "ft²", &["ft2", "sq ft", "sqft", "square foot", "square feet"]), 10.7639),
    linear(unit("Square Inch", "in²", &["in2", "sq in", "square inch", "square inches"]), 1550.0),
    linear(unit("Acre", "ac", &["acre", "acres"]), 0.000247105),
    linear(unit("Hectare", "ha", &["hectare", "hectares"]), 0.0001),
];

static AREA: CategoryTable = CategoryTable::Linear(LinearCategory {
    category: Category::Area,
    units: &AREA_UNITS,
});

// Volume (base: cubic meter)
static VOLUME_UNITS: [LinearUnit; 11] = [
    linear(unit("Cubic Meter", "m³", &["m3", "cubic meter", "cubic meters", "cubic metre", "cubic metres"]), 1.0),
    linear(unit("Cubic Centimeter", "cm³", &["cm3", "cc", "cubic centimeter", "cubic centimeters", "cubic centimetre", "cubic centimetres"]), 1_000_000.0),
    linear(unit("Liter", "L", &["l", "liter", "liters", "litre", "litres"]), 1000.0),
    linear(unit("Milliliter", "mL", &["ml", "milliliter", "milliliters", "millilitre", "millilitres"]), 1_000_000.0),
    linear(unit("Gallon (US)", "gal", &["gallon", "gallons"]), 264.172),
    linear(unit("Quart (US)", "qt", &["quart", "quarts"]), 1056.69),
    linear(unit("Pint (US)", "pt", &["pint", "pints"]), 2113.38),
    linear(unit("Cup (US)", "cup", &["cups"]), 4226.75),
    linear(unit("Fluid Ounce (US)", "fl oz", &["fl-oz", "floz", "fluid ounce", "fluid ounces"]), 33814.0),
    linear(unit("Tablespoon (US)", "tbsp", &["tablespoon", "tablespoons"]), 67628.0),
    linear(unit("Teaspoon (US)", "tsp", &["teaspoon", "teaspoons"]), 202884.0),
];

static VOLUME: CategoryTable = CategoryTable::Linear(LinearCategory {
    category: Category::Volume,
    units: &VOLUME_UNITS,
});
