//! Pad configuration loaded from JSON.

use crate::error::{SignatureError, SignatureResult};
use crate::style::SignatureStyle;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest pad side in pixels.
pub const MAX_PAD_DIMENSION: f64 = 8192.0;

/// Size and style of a pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Pad width in pixels.
    pub width: u32,
    /// Pad height in pixels.
    pub height: u32,
    pub style: SignatureStyle,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
            style: SignatureStyle::default(),
        }
    }
}

impl SignatureConfig {
    /// Pad bounds as a kurbo size.
    pub fn bounds(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Check that the config describes a drawable pad.
    pub fn validate(&self) -> SignatureResult<()> {
        validate_bounds(self.bounds())?;
        self.style.validate()
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> SignatureResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SignatureError::Config(format!("Invalid config: {}", e)))?;
        config.validate().inspect_err(|e| {
            log::warn!("Rejected signature config: {}", e);
        })?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> SignatureResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SignatureError::Config(e.to_string()))
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> SignatureResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("Loaded signature config from {}", path.display());
        Self::from_json(&json)
    }

    /// Write the config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> SignatureResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

pub(crate) fn validate_bounds(bounds: Size) -> SignatureResult<()> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 || !bounds.is_finite() {
        return Err(SignatureError::EmptyBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    if bounds.width > MAX_PAD_DIMENSION || bounds.height > MAX_PAD_DIMENSION {
        return Err(SignatureError::BoundsTooLarge {
            width: bounds.width,
            height: bounds.height,
            max: MAX_PAD_DIMENSION,
        });
    }
    Ok(())
}
