//! Threshold-segmented line chart rendering for e-ink displays
//!
//! This module turns a windowed price series into a crisp palette raster:
//!
//! - One continuous price line over the whole window, in the foreground color
//!   except where it is accented
//! - In three-color mode, the parts of the current session that trade below
//!   the session's opening price drawn in the accent color, with the
//!   color change interpolated exactly onto the opening price
//! - A dashed vertical divider where a stitched prior-day tail ends
//!
//! There are no axes, ticks or labels; it is a sparkline sized to the panel.
//! Lines are rasterized directly at target resolution without anti-aliasing,
//! so every pixel is one of the panel's palette colors.
//!
//! # Examples
//!
//! ```ignore
//! use ticker_core::chart::{render, ColorMode, RenderSpec};
//!
//! let spec = RenderSpec::new(185, 80, ColorMode::ThreeColor);
//! let raster = render(window.series(), window.boundary_index(), &spec)?;
//! ```

use serde::{Deserialize, Serialize};

pub mod constants;
mod line;
mod renderer;
pub mod segment;
pub mod viewport;

pub use renderer::{SegmentedSeriesRenderer, render};
pub use segment::{AccentSpan, accent_span};
pub use viewport::ChartViewport;

use crate::error::{ChartError, ChartResult};
use crate::raster::InkColor;
use constants::{ACCENT_COLOR, DEFAULT_LINE_WIDTH_PX, MAX_LINE_WIDTH_PX};

/// Number of ink colors the target panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Black on white only
    #[default]
    TwoColor,
    /// Black and red on white
    ThreeColor,
}

impl ColorMode {
    /// Pick the mode from a "three-color panel" flag
    pub const fn from_three_color(three_color: bool) -> Self {
        if three_color {
            Self::ThreeColor
        } else {
            Self::TwoColor
        }
    }

    /// Accent color, if the mode has one
    pub const fn accent(self) -> Option<InkColor> {
        match self {
            Self::TwoColor => None,
            Self::ThreeColor => Some(ACCENT_COLOR),
        }
    }
}

/// Output raster dimensions and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSpec {
    /// Raster width in pixels
    pub width: u32,
    /// Raster height in pixels
    pub height: u32,
    /// Two- or three-color output
    pub color_mode: ColorMode,
    /// Price line width in pixels
    pub line_width: u32,
}

impl RenderSpec {
    /// Create a spec with the default line width
    pub const fn new(width: u32, height: u32, color_mode: ColorMode) -> Self {
        Self {
            width,
            height,
            color_mode,
            line_width: DEFAULT_LINE_WIDTH_PX,
        }
    }

    /// Set the line width
    pub const fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Check dimensions and line width
    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if !(1..=MAX_LINE_WIDTH_PX).contains(&self.line_width) {
            return Err(ChartError::InvalidLineWidth {
                width: self.line_width,
            });
        }

        Ok(())
    }
}
