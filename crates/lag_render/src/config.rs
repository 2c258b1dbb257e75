//! Widget configuration
//!
//! Every field is optional when loading from JSON; missing fields take the
//! defaults below.
//!
//! ```json
//! {
//!     "size": [100, 100],
//!     "min": 0,
//!     "max": 34,
//!     "background_color": "rgba(200, 0, 0, 0.8)",
//!     "frame_color": "#00FF00",
//!     "draw_frequency": 2
//! }
//! ```

use glam::UVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgba;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("widget size must be non-zero, got {width}x{height}")]
    EmptySize { width: u32, height: u32 },

    #[error("pixel ratio must be positive, got {0}")]
    PixelRatio(f32),

    #[error("value range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f64, max: f64 },

    #[error("sample capacity must be non-zero")]
    ZeroCapacity,

    #[error("draw frequency must be positive, got {0}")]
    DrawFrequency(f64),

    #[error("text window must cover at least one sample")]
    ZeroTextWindow,

    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagometerConfig {
    /// Logical size in points, `[width, height]`.
    pub size: [u32; 2],
    /// Backing pixels per logical point.
    pub pixel_ratio: f32,
    /// Value mapped to the bottom edge of the chart, in milliseconds.
    pub min: f64,
    /// Value mapped to the top edge of the chart, in milliseconds.
    pub max: f64,
    pub background_color: Rgba,
    pub border_color: Rgba,
    pub text_color: Rgba,
    /// CSS-style font shorthand, e.g. `28px Arial`.
    pub font: String,
    pub frame_color: Rgba,
    pub script_color: Rgba,
    /// Redraws per second.
    pub draw_frequency: f64,
    /// Ring buffer capacity. Defaults to twice the logical width.
    pub capacity: Option<usize>,
    /// Samples averaged for the text readouts.
    pub text_window: usize,
}

impl Default for LagometerConfig {
    fn default() -> Self {
        Self {
            size: [100, 100],
            pixel_ratio: 2.0,
            min: 0.0,
            max: 34.0,
            background_color: Rgba::new(200, 0, 0, 204),
            border_color: Rgba::new(255, 0, 0, 204),
            text_color: Rgba::new(255, 255, 255, 204),
            font: "28px Arial".to_string(),
            frame_color: Rgba::opaque(0x00, 0xFF, 0x00),
            script_color: Rgba::opaque(0xBB, 0xBB, 0xFF),
            draw_frequency: 2.0,
            capacity: None,
            text_window: 20,
        }
    }
}

impl LagometerConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptySize { width, height });
        }
        if !(self.pixel_ratio > 0.0) {
            return Err(ConfigError::PixelRatio(self.pixel_ratio));
        }
        if !(self.min < self.max) {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.capacity() == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.draw_frequency > 0.0) {
            return Err(ConfigError::DrawFrequency(self.draw_frequency));
        }
        if self.text_window == 0 {
            return Err(ConfigError::ZeroTextWindow);
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(self.size[0] as usize * 2)
    }

    pub fn logical_size(&self) -> UVec2 {
        UVec2::from(self.size)
    }

    pub fn backing_size(&self) -> UVec2 {
        (self.logical_size().as_vec2() * self.pixel_ratio)
            .round()
            .as_uvec2()
    }

    /// Minimum time between two actual redraws.
    pub fn redraw_interval_ms(&self) -> f64 {
        1000.0 / self.draw_frequency
    }

    /// Pixel size taken from the font shorthand, 16 if it names none.
    pub fn font_px(&self) -> f32 {
        self.font
            .split_whitespace()
            .find_map(|part| part.strip_suffix("px")?.parse::<f32>().ok())
            .unwrap_or(16.0)
    }
}
