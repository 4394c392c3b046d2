use crate::constants::*;
use crate::overlay::OverlayGeometry;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Editing session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignOptions {
    // Page display
    pub render_scale: f32,

    // New overlay geometry
    pub default_width_fraction: f32,
    pub bottom_margin_px: f32,

    // Resize floor
    pub min_overlay_px: f32,

    // Backend processing mode
    pub filter: FilterMode,
}

impl Default for SignOptions {
    fn default() -> Self {
        Self {
            render_scale: DEFAULT_RENDER_SCALE,
            default_width_fraction: DEFAULT_WIDTH_FRACTION,
            bottom_margin_px: DEFAULT_BOTTOM_MARGIN_PX,
            min_overlay_px: MIN_OVERLAY_PX,
            filter: FilterMode::default(),
        }
    }
}

impl SignOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SignError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(SignError::Config(
                "Render scale must be a positive number".to_string(),
            ));
        }

        if !(self.default_width_fraction > 0.0 && self.default_width_fraction <= 1.0) {
            return Err(SignError::Config(format!(
                "Default width fraction must be in (0, 1], got {}",
                self.default_width_fraction
            )));
        }

        if !(self.bottom_margin_px.is_finite() && self.bottom_margin_px >= 0.0) {
            return Err(SignError::Config(
                "Bottom margin cannot be negative".to_string(),
            ));
        }

        if !(self.min_overlay_px.is_finite() && self.min_overlay_px > 0.0) {
            return Err(SignError::Config(
                "Minimum overlay size must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Overlay geometry described by these options
    pub fn geometry(&self) -> OverlayGeometry {
        OverlayGeometry {
            width_fraction: self.default_width_fraction,
            bottom_margin_px: self.bottom_margin_px,
            min_size_px: self.min_overlay_px,
        }
    }
}
