//! Solid and dashed line drawing
//!
//! Lines are stepped along their major axis, one brush per step, so the
//! caller can pick a color for every step from its position along the line.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Line style for strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineStyle {
    /// Solid continuous line
    Solid,
    /// Dashed line with specified dash and gap lengths
    Dashed {
        /// Length of each dash in pixels
        dash_length: u32,
        /// Length of gap between dashes in pixels
        gap_length: u32,
    },
}

impl LineStyle {
    /// Whether the step at `step` pixels from the start is inked
    fn is_inked(self, step: u32) -> bool {
        match self {
            Self::Solid => true,
            Self::Dashed {
                dash_length,
                gap_length,
            } => {
                let pattern_length = dash_length + gap_length;
                pattern_length == 0 || step % pattern_length < dash_length
            }
        }
    }
}

/// Draw a line from `start` to `end` with a `width` x `width` brush.
///
/// `paint` receives the fraction along the line (`0.0` at `start`, `1.0` at
/// `end`) for every inked step and returns its color, or `None` to leave
/// that step untouched.
pub(super) fn draw_line<C, D, F>(
    start: Point,
    end: Point,
    width: u32,
    style: LineStyle,
    target: &mut D,
    mut paint: F,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
    F: FnMut(f64) -> Option<C>,
{
    let delta = end - start;
    let steps = delta.x.unsigned_abs().max(delta.y.unsigned_abs());
    let brush = Size::new(width, width);

    for step in (0..=steps).filter(|&step| style.is_inked(step)) {
        let t = if steps == 0 {
            0.0
        } else {
            f64::from(step) / f64::from(steps)
        };
        let Some(color) = paint(t) else {
            continue;
        };

        let offset = Point::new(
            scale_rounded(delta.x, step, steps),
            scale_rounded(delta.y, step, steps),
        );
        target.fill_solid(&Rectangle::new(start + offset, brush), color)?;
    }

    Ok(())
}

/// `delta * step / steps`, rounded half away from zero
fn scale_rounded(delta: i32, step: u32, steps: u32) -> i32 {
    if steps == 0 {
        return 0;
    }

    let numerator = i64::from(delta) * i64::from(step);
    let denominator = i64::from(steps);
    let half = denominator / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{InkColor, Raster};
    use alloc::vec::Vec;

    #[test]
    fn test_dashed_vertical_line_pattern() {
        let mut raster = Raster::new(Size::new(3, 12), InkColor::White);
        let style = LineStyle::Dashed {
            dash_length: 3,
            gap_length: 2,
        };
        let Ok(()) = draw_line(
            Point::new(1, 0),
            Point::new(1, 11),
            1,
            style,
            &mut raster,
            |_| Some(InkColor::Black),
        );

        let column: Vec<bool> = (0..12)
            .map(|y| raster.pixel(Point::new(1, y)) == Some(InkColor::Black))
            .collect();
        assert_eq!(
            column,
            [
                true, true, true, false, false, true, true, true, false, false, true, true
            ]
        );
        assert_eq!(raster.count(InkColor::Black), 8);
    }

    #[test]
    fn test_solid_line() {
        let mut raster = Raster::new(Size::new(5, 5), InkColor::White);
        let Ok(()) = draw_line(
            Point::new(0, 2),
            Point::new(4, 2),
            1,
            LineStyle::Solid,
            &mut raster,
            |_| Some(InkColor::Red),
        );
        assert_eq!(raster.count(InkColor::Red), 5);
    }

    #[test]
    fn test_diagonal_line_steps_once_per_major_pixel() {
        let mut raster = Raster::new(Size::new(11, 6), InkColor::White);
        let Ok(()) = draw_line(
            Point::new(0, 5),
            Point::new(10, 0),
            1,
            LineStyle::Solid,
            &mut raster,
            |_| Some(InkColor::Black),
        );

        assert_eq!(raster.count(InkColor::Black), 11);
        assert_eq!(raster.pixel(Point::new(0, 5)), Some(InkColor::Black));
        assert_eq!(raster.pixel(Point::new(10, 0)), Some(InkColor::Black));
        // Every column holds exactly one pixel
        for x in 0..11 {
            let inked = (0..6)
                .filter(|&y| raster.pixel(Point::new(x, y)) == Some(InkColor::Black))
                .count();
            assert_eq!(inked, 1, "x = {x}");
        }
    }

    #[test]
    fn test_paint_splits_line_by_fraction() {
        let mut raster = Raster::new(Size::new(11, 1), InkColor::White);
        let Ok(()) = draw_line(
            Point::new(0, 0),
            Point::new(10, 0),
            1,
            LineStyle::Solid,
            &mut raster,
            |t| Some(if t <= 0.3 { InkColor::Red } else { InkColor::Black }),
        );

        assert_eq!(raster.count(InkColor::Red), 4);
        assert_eq!(raster.count(InkColor::Black), 7);
        assert_eq!(raster.pixel(Point::new(3, 0)), Some(InkColor::Red));
        assert_eq!(raster.pixel(Point::new(4, 0)), Some(InkColor::Black));
    }

    #[test]
    fn test_skipped_steps_are_left_untouched() {
        let mut raster = Raster::new(Size::new(11, 1), InkColor::White);
        let Ok(()) = draw_line(
            Point::new(0, 0),
            Point::new(10, 0),
            1,
            LineStyle::Solid,
            &mut raster,
            |t| (t >= 0.5).then_some(InkColor::Black),
        );
        assert_eq!(raster.count(InkColor::Black), 6);
        assert_eq!(raster.count(InkColor::White), 5);
    }

    #[test]
    fn test_wide_brush() {
        let mut raster = Raster::new(Size::new(6, 4), InkColor::White);
        let Ok(()) = draw_line(
            Point::new(0, 1),
            Point::new(4, 1),
            2,
            LineStyle::Solid,
            &mut raster,
            |_| Some(InkColor::Black),
        );
        assert_eq!(raster.count(InkColor::Black), 12);
        assert_eq!(
            raster.bounds_of(InkColor::Black),
            Some(Rectangle::new(Point::new(0, 1), Size::new(6, 2)))
        );
    }

    #[test]
    fn test_rounding_is_symmetric() {
        assert_eq!(scale_rounded(10, 8, 18), 4);
        assert_eq!(scale_rounded(-10, 8, 18), -4);
        assert_eq!(scale_rounded(5, 1, 2), 3);
        assert_eq!(scale_rounded(-5, 1, 2), -3);
        assert_eq!(scale_rounded(7, 0, 0), 0);
    }
}
