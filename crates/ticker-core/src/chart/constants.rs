//! Constants for chart rendering
//!
//! Pixel sizes carry a `_PX` suffix.

use crate::raster::InkColor;

/// Raster background
pub const BACKGROUND_COLOR: InkColor = InkColor::White;

/// Price line and divider color
pub const FOREGROUND_COLOR: InkColor = InkColor::Black;

/// Color of below-reference segments in three-color mode
pub const ACCENT_COLOR: InkColor = InkColor::Red;

/// Default price line width in pixels
pub const DEFAULT_LINE_WIDTH_PX: u32 = 1;

/// Thickest supported price line in pixels
///
/// Anything wider smears on a 122 px tall panel.
pub const MAX_LINE_WIDTH_PX: u32 = 2;

/// Length of each divider dash in pixels
pub const DIVIDER_DASH_LENGTH_PX: u32 = 3;

/// Gap between divider dashes in pixels
pub const DIVIDER_GAP_LENGTH_PX: u32 = 2;

/// Price ranges narrower than this are treated as flat (prevents division by zero)
pub const MIN_PRICE_RANGE: f64 = 1e-9;
