//! Palette raster used as the chart drawing surface.
//!
//! E-ink panels only show a handful of colors, so the raster stores one
//! [`InkColor`] per pixel instead of RGB values. Drawing goes through the
//! `embedded-graphics` [`DrawTarget`] trait; the finished raster can be
//! blitted into any target whose color type converts from [`InkColor`].

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::{PixelColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Colors available on a black/white/red e-ink panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InkColor {
    /// Paper white, the background
    #[default]
    White,
    /// Black ink, the foreground
    Black,
    /// Red ink, the accent on three-color panels
    Red,
}

impl InkColor {
    /// Palette index as used by the panel driver (white, black, red)
    pub const fn palette_index(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 1,
            Self::Red => 2,
        }
    }
}

impl PixelColor for InkColor {
    type Raw = ();
}

impl From<InkColor> for Rgb888 {
    fn from(color: InkColor) -> Self {
        match color {
            InkColor::White => Rgb888::new(255, 255, 255),
            InkColor::Black => Rgb888::new(0, 0, 0),
            InkColor::Red => Rgb888::new(255, 0, 0),
        }
    }
}

/// Inclusive bounding box of pixels with a given color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelBounds {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl PixelBounds {
    /// Create bounds covering a single pixel.
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Expand the bounds to include the given pixel coordinate.
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-backed palette raster implementing `DrawTarget<Color = InkColor>`.
///
/// Pixels are stored row-major. Drawing outside the raster is clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<InkColor>,
}

impl Raster {
    /// Allocate a raster filled with `background`.
    pub fn new(size: Size, background: InkColor) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Color at `point`, `None` outside the raster
    pub fn pixel(&self, point: Point) -> Option<InkColor> {
        self.index_of(point.x, point.y).map(|idx| self.pixels[idx])
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[InkColor] {
        &self.pixels
    }

    /// One palette index byte per pixel, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().map(|color| color.palette_index()).collect()
    }

    /// Number of pixels with the given color
    pub fn count(&self, color: InkColor) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }

    /// Smallest rectangle containing every pixel of `color`.
    pub fn bounds_of(&self, color: InkColor) -> Option<Rectangle> {
        let mut bounds: Option<PixelBounds> = None;
        for (idx, _) in self
            .pixels
            .iter()
            .enumerate()
            .filter(|&(_, &pixel)| pixel == color)
        {
            let (x, y) = (idx % self.width, idx / self.width);
            match &mut bounds {
                Some(rect) => rect.expand(x, y),
                None => bounds = Some(PixelBounds::from_point(x, y)),
            }
        }
        bounds.map(PixelBounds::to_rectangle)
    }

    /// Copy the raster into another draw target with its top-left corner at `offset`.
    pub fn blit<D, C>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        C: PixelColor + From<InkColor>,
        D: DrawTarget<Color = C>,
    {
        let width = self.width;
        target.draw_iter(self.pixels.iter().enumerate().map(move |(idx, &color)| {
            let x = offset.x + (idx % width) as i32;
            let y = offset.y + (idx / width) as i32;
            Pixel(Point::new(x, y), C::from(color))
        }))
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Raster {
    type Color = InkColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index_of(coord.x, coord.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clamp_x = |x: i64| x.clamp(0, self.width as i64) as usize;
        let clamp_y = |y: i64| y.clamp(0, self.height as i64) as usize;

        let left = i64::from(area.top_left.x);
        let top = i64::from(area.top_left.y);
        let x_start = clamp_x(left);
        let y_start = clamp_y(top);
        let x_end = clamp_x(left + i64::from(area.size.width));
        let y_end = clamp_y(top + i64::from(area.size.height));
        let w = self.width;

        for y in y_start..y_end {
            self.pixels[y * w + x_start..y * w + x_end].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
