//! Render configuration
//!
//! Everything a render pass reads from its host besides the data: the
//! contrast theme and the surface font metrics.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::{Metrics, ThemeMode};

/// Theme and metrics for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Contrast theme
    pub theme: ThemeMode,
    /// Character and line metrics
    pub metrics: Metrics,
}

impl RenderConfig {
    /// Set the contrast theme
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Set the theme from the host's high-contrast predicate
    #[must_use]
    pub fn with_high_contrast(mut self, high_contrast: bool) -> Self {
        self.theme = ThemeMode::from_high_contrast(high_contrast);
        self
    }

    /// Set surface metrics
    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Check that metrics are positive and finite
    pub fn validate(&self) -> Result<()> {
        let Metrics {
            character_width,
            line_height,
        } = self.metrics;
        if !(character_width.is_finite() && character_width > 0.0) {
            return Err(Error::invalid_config(format!(
                "character_width must be positive, got {character_width}"
            )));
        }
        if !(line_height.is_finite() && line_height > 0.0) {
            return Err(Error::invalid_config(format!(
                "line_height must be positive, got {line_height}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json(&json)
    }
}
