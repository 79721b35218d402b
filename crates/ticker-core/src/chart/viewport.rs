//! Coordinate transformation from data space to raster pixels
//!
//! Data space is (fractional sample index, price). Screen space is the
//! raster's pixel grid with y growing downward. The price range is taken
//! from the series itself, so the chart always fills the raster height.

use embedded_graphics::prelude::*;

use super::constants::MIN_PRICE_RANGE;
use crate::series::{Sample, price_range};

/// Maps sample index and price to raster pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    /// Number of samples spread across the width
    sample_count: usize,
    /// Lowest price, mapped to the bottom row
    price_min: f64,
    /// Highest price, mapped to the top row
    price_max: f64,
    /// Raster size in pixels
    size: Size,
}

impl ChartViewport {
    /// Create a viewport from explicit bounds
    pub const fn new(sample_count: usize, price_min: f64, price_max: f64, size: Size) -> Self {
        Self {
            sample_count,
            price_min,
            price_max,
            size,
        }
    }

    /// Fit the viewport to the min/max price of a series
    pub fn fit(series: &[Sample], size: Size) -> Self {
        let (price_min, price_max) = price_range(series).unwrap_or((0.0, 0.0));
        Self::new(series.len(), price_min, price_max, size)
    }

    /// Price span covered by the raster height
    pub fn price_range(&self) -> f64 {
        self.price_max - self.price_min
    }

    /// Pixel column for a fractional sample index.
    ///
    /// Index 0 lands on column 0, the last sample on the last column.
    pub fn index_to_x(&self, index: f64) -> i32 {
        if self.sample_count < 2 {
            return 0;
        }

        let max_x = self.size.width.saturating_sub(1) as f64;
        let span = (self.sample_count - 1) as f64;
        to_pixel(index / span * max_x, max_x)
    }

    /// Pixel row for a price; the highest price is row 0.
    ///
    /// A flat series sits in the middle row.
    pub fn price_to_y(&self, price: f64) -> i32 {
        let max_y = self.size.height.saturating_sub(1) as f64;
        let range = self.price_range();

        if range <= MIN_PRICE_RANGE {
            return to_pixel(max_y / 2.0, max_y);
        }

        let y_norm = (price - self.price_min) / range;
        // Screen Y increases downward
        to_pixel((1.0 - y_norm) * max_y, max_y)
    }

    /// Transform a data-space point to raster coordinates
    pub fn data_to_screen(&self, index: f64, price: f64) -> Point {
        Point::new(self.index_to_x(index), self.price_to_y(price))
    }
}

/// Round to the nearest pixel, clamped to `[0, max]`.
fn to_pixel(value: f64, max: f64) -> i32 {
    let clamped = if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    };
    // Non-negative, so adding one half and truncating rounds half up
    (clamped + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::prices;

    #[test]
    fn test_x_spans_full_width() {
        let viewport = ChartViewport::new(11, 100.0, 120.0, Size::new(101, 21));
        assert_eq!(viewport.index_to_x(0.0), 0);
        assert_eq!(viewport.index_to_x(5.0), 50);
        assert_eq!(viewport.index_to_x(5.5), 55);
        assert_eq!(viewport.index_to_x(10.0), 100);
    }

    #[test]
    fn test_y_is_inverted() {
        let viewport = ChartViewport::new(11, 100.0, 120.0, Size::new(101, 21));
        assert_eq!(viewport.price_to_y(120.0), 0);
        assert_eq!(viewport.price_to_y(110.0), 10);
        assert_eq!(viewport.price_to_y(100.0), 20);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let viewport = ChartViewport::new(3, 0.0, 10.0, Size::new(10, 10));
        assert_eq!(viewport.index_to_x(-1.0), 0);
        assert_eq!(viewport.index_to_x(7.0), 9);
        assert_eq!(viewport.price_to_y(50.0), 0);
        assert_eq!(viewport.price_to_y(-50.0), 9);
    }

    #[test]
    fn test_fit_uses_series_range() {
        let viewport = ChartViewport::fit(&prices(&[3.0, 7.0, 5.0]), Size::new(3, 5));
        assert_eq!(viewport.price_range(), 4.0);
        assert_eq!(viewport.data_to_screen(0.0, 3.0), Point::new(0, 4));
        assert_eq!(viewport.data_to_screen(1.0, 7.0), Point::new(1, 0));
        assert_eq!(viewport.data_to_screen(2.0, 5.0), Point::new(2, 2));
    }

    #[test]
    fn test_flat_series_sits_mid_height() {
        let viewport = ChartViewport::fit(&prices(&[50.0, 50.0]), Size::new(20, 11));
        assert_eq!(viewport.price_to_y(50.0), 5);
    }

    #[test]
    fn test_single_sample_maps_to_left_edge() {
        let viewport = ChartViewport::fit(&prices(&[100.0]), Size::new(20, 10));
        assert_eq!(viewport.index_to_x(0.0), 0);
    }
}
