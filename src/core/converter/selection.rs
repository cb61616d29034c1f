//! Widget selection state
//!
//! The presentation layer owns one `ConverterState` per session and funnels every
//! user event through it. Each mutation recomputes the result synchronously, and
//! `from_unit != to_unit` holds after every operation.

use tracing::debug;

use super::convert_with;
use super::format::FormatOptions;
use super::registry::{first_units, lookup, unit_names, Category};
use crate::shared::errors::ConversionResult;
use crate::shared::settings::ConverterSettings;

pub const DEFAULT_INPUT: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    category: Category,
    from_unit: &'static str,
    to_unit: &'static str,
    input: String,
    format: FormatOptions,
    result: ConversionResult<String>,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterState {
    /// length / Meter -> Kilometer / "1"
    pub fn new() -> Self {
        Self::build(Category::Length, DEFAULT_INPUT.to_string(), FormatOptions::default())
    }

    /// Same starting selection as `new`, formatted with the configured options
    pub fn with_settings(settings: &ConverterSettings) -> Self {
        Self::build(Category::Length, DEFAULT_INPUT.to_string(), settings.format.clone())
    }

    fn build(category: Category, input: String, format: FormatOptions) -> Self {
        let (from_unit, to_unit) = first_units(category);
        let mut state = Self {
            category,
            from_unit,
            to_unit,
            input,
            format,
            result: Ok(String::new()),
        };
        state.recompute();
        state
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn from_unit(&self) -> &'static str {
        self.from_unit
    }

    pub fn to_unit(&self) -> &'static str {
        self.to_unit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> &ConversionResult<String> {
        &self.result
    }

    /// Text shown in the result box: the conversion or the error message
    pub fn display(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(err) => err.to_string(),
        }
    }

    /// Units offered by both dropdowns for the current category
    pub fn available_units(&self) -> Vec<&'static str> {
        unit_names(self.category)
    }

    /// Switch category; units reset to the category's first and second unit
    pub fn set_category(&mut self, category: Category) {
        let (from_unit, to_unit) = first_units(category);
        self.category = category;
        self.from_unit = from_unit;
        self.to_unit = to_unit;
        self.recompute();
    }

    pub fn set_category_by_name(&mut self, name: &str) -> ConversionResult<()> {
        let category = name.parse::<Category>()?;
        self.set_category(category);
        Ok(())
    }

    /// Choosing the current target as source moves the target to the first other unit
    pub fn set_from_unit(&mut self, unit: &str) -> ConversionResult<()> {
        let unit = lookup(self.category, unit)?.name;
        self.from_unit = unit;
        if self.from_unit == self.to_unit {
            self.to_unit = self.first_other_unit(unit);
        }
        self.recompute();
        Ok(())
    }

    /// Choosing the current source as target moves the source to the first other unit
    pub fn set_to_unit(&mut self, unit: &str) -> ConversionResult<()> {
        let unit = lookup(self.category, unit)?.name;
        self.to_unit = unit;
        if self.to_unit == self.from_unit {
            self.from_unit = self.first_other_unit(unit);
        }
        self.recompute();
        Ok(())
    }

    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        self.recompute();
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.recompute();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.recompute();
    }

    fn first_other_unit(&self, taken: &str) -> &'static str {
        let units = unit_names(self.category);
        // Every category has at least two units, so a distinct one always exists
        units
            .iter()
            .copied()
            .find(|u| *u != taken)
            .unwrap_or(units[0])
    }

    fn recompute(&mut self) {
        self.result = convert_with(
            self.category,
            self.from_unit,
            self.to_unit,
            &self.input,
            &self.format,
        );
        debug!(
            category = %self.category,
            from_unit = self.from_unit,
            to_unit = self.to_unit,
            input = %self.input,
            ok = self.result.is_ok(),
            "recomputed conversion"
        );
    }
}
