//! Chart configuration
//!
//! Everything the display layer needs to drive the core besides the data
//! itself. Every field has a default, so a config file only needs to name
//! what it changes.

use serde::{Deserialize, Serialize};

use crate::chart::constants::DEFAULT_LINE_WIDTH_PX;
use crate::chart::{ColorMode, RenderSpec};
use crate::error::ChartResult;
use crate::session::WindowConfig;

/// Session window and chart styling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Session window selection
    pub window: WindowConfig,
    /// Two- or three-color panel
    pub color_mode: ColorMode,
    /// Price line width in pixels
    pub line_width: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            color_mode: ColorMode::default(),
            line_width: DEFAULT_LINE_WIDTH_PX,
        }
    }
}

impl ChartConfig {
    /// Build a validated render spec for a chart area of the given size
    pub fn render_spec(&self, width: u32, height: u32) -> ChartResult<RenderSpec> {
        let spec = RenderSpec::new(width, height, self.color_mode).with_line_width(self.line_width);
        spec.validate()?;
        Ok(spec)
    }
}
