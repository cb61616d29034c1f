//! Settings command module
//!
//! Exposes the read-only formatting configuration.

use crate::shared::error::AppResult;
use crate::shared::settings::ConverterSettings;

/// Get current converter settings, defaults when no settings file exists
pub fn get_settings() -> AppResult<ConverterSettings> {
    ConverterSettings::load()
}
