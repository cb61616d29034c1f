use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::core::converter::format::{FormatOptions, MAX_PRECISION};
use crate::shared::error::{AppError, AppResult};

/// Read-only formatting configuration. Nothing here is ever written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "settings.ts")]
pub struct ConverterSettings {
    pub format: FormatOptions,
}

impl ConverterSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "unit-converter-widget")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load from the platform config dir; a missing file means defaults
    pub fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;

        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;

        debug!(path = %path.display(), precision = settings.format.precision, "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> AppResult<()> {
        let format = &self.format;
        if format.precision > MAX_PRECISION {
            return Err(AppError::Config(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, format.precision
            )));
        }
        // NaN fails both comparisons
        if !(format.scientific_below >= 0.0 && format.scientific_below <= format.scientific_above) {
            return Err(AppError::Config(format!(
                "scientific thresholds must satisfy 0 <= below <= above, got {} and {}",
                format.scientific_below, format.scientific_above
            )));
        }
        Ok(())
    }
}
