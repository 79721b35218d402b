//! Segmented series renderer
//!
//! Every segment is rasterized once and colored per pixel by which side of
//! the reference crossing it falls on. Base pixels are painted before accent
//! pixels so shared vertices keep the accent, and the divider goes on top.

use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use log::{debug, trace};

use super::RenderSpec;
use super::constants::{
    BACKGROUND_COLOR, DIVIDER_DASH_LENGTH_PX, DIVIDER_GAP_LENGTH_PX, FOREGROUND_COLOR,
};
use super::line::{LineStyle, draw_line};
use super::segment::{AccentSpan, accent_span};
use super::viewport::ChartViewport;
use crate::error::{ChartError, ChartResult};
use crate::raster::{InkColor, Raster};
use crate::series::Sample;
use crate::session::Window;

/// Renders windowed price series into palette rasters
///
/// Holds only the validated [`RenderSpec`]; every call allocates its own
/// raster, so one renderer can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct SegmentedSeriesRenderer {
    spec: RenderSpec,
}

impl SegmentedSeriesRenderer {
    /// Create a renderer, rejecting zero dimensions or unsupported line widths.
    pub fn new(spec: RenderSpec) -> ChartResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    /// Get the render spec
    pub fn spec(&self) -> &RenderSpec {
        &self.spec
    }

    /// Render a window produced by the session selector
    pub fn render_window(&self, window: &Window) -> ChartResult<Raster> {
        self.render(window.series(), window.boundary_index())
    }

    /// Render `series` with the current session starting at `boundary_index`.
    ///
    /// The sample at `boundary_index` is the reference price. When
    /// `boundary_index == series.len()` there is no reference: the whole
    /// series is drawn in the foreground color with no divider.
    pub fn render(&self, series: &[Sample], boundary_index: usize) -> ChartResult<Raster> {
        if boundary_index > series.len() {
            return Err(ChartError::BoundaryOutOfRange {
                index: boundary_index,
                len: series.len(),
            });
        }

        if let Some(index) = series.iter().position(|sample| !sample.price.is_finite()) {
            return Err(ChartError::NonFinitePrice { index });
        }

        let size = Size::new(self.spec.width, self.spec.height);
        let mut raster = Raster::new(size, BACKGROUND_COLOR);

        if series.is_empty() {
            debug!("Empty series, rendering blank {}x{} chart", size.width, size.height);
            return Ok(raster);
        }

        let viewport = ChartViewport::fit(series, size);
        match self.draw_chart(series, boundary_index, &viewport, &mut raster) {
            Ok(()) => Ok(raster),
            Err(never) => match never {},
        }
    }

    fn draw_chart<D>(
        &self,
        series: &[Sample],
        boundary_index: usize,
        viewport: &ChartViewport,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = InkColor>,
    {
        let line_width = self.spec.line_width;

        let Some(reference) = series.get(boundary_index).map(|sample| sample.price) else {
            debug!(
                "No current-session samples in {} sample window, drawing base color only",
                series.len()
            );
            return draw_price_line(series, boundary_index, None, viewport, line_width, target);
        };

        let accent = self
            .spec
            .color_mode
            .accent()
            .map(|color| (reference, color));
        draw_price_line(series, boundary_index, accent, viewport, line_width, target)?;

        if boundary_index > 0 {
            let x = viewport.index_to_x(boundary_index as f64);
            let bottom = self.spec.height.saturating_sub(1) as i32;
            draw_line(
                Point::new(x, 0),
                Point::new(x, bottom),
                line_width,
                LineStyle::Dashed {
                    dash_length: DIVIDER_DASH_LENGTH_PX,
                    gap_length: DIVIDER_GAP_LENGTH_PX,
                },
                target,
                |_| Some(FOREGROUND_COLOR),
            )?;
        }

        Ok(())
    }
}

/// Render `series` into a fresh raster.
///
/// Convenience wrapper around [`SegmentedSeriesRenderer`].
pub fn render(series: &[Sample], boundary_index: usize, spec: &RenderSpec) -> ChartResult<Raster> {
    SegmentedSeriesRenderer::new(*spec)?.render(series, boundary_index)
}

/// One line between adjacent samples, in raster coordinates
struct Segment {
    /// Index of the first sample
    index: usize,
    start: Point,
    end: Point,
    /// Below-reference part, if any
    accent: Option<AccentSpan>,
}

/// Connect consecutive samples with straight lines.
///
/// `accent` holds the reference price and accent color. Segments from
/// `boundary_index` onward switch to the accent color over their
/// below-reference part; earlier segments stay in the foreground color.
/// A single sample becomes a single dot.
fn draw_price_line<D>(
    series: &[Sample],
    boundary_index: usize,
    accent: Option<(f64, InkColor)>,
    viewport: &ChartViewport,
    line_width: u32,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = InkColor>,
{
    if let [only] = series {
        let point = viewport.data_to_screen(0.0, only.price);
        return Rectangle::new(point, Size::new(line_width, line_width))
            .into_styled(PrimitiveStyle::with_fill(FOREGROUND_COLOR))
            .draw(target);
    }

    let segments: Vec<Segment> = series
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (p0, p1) = (pair[0].price, pair[1].price);
            Segment {
                index,
                start: viewport.data_to_screen(index as f64, p0),
                end: viewport.data_to_screen((index + 1) as f64, p1),
                accent: accent
                    .filter(|_| index >= boundary_index)
                    .and_then(|(reference, _)| accent_span(p0, p1, reference)),
            }
        })
        .collect();

    for segment in &segments {
        let accent = segment.accent;
        draw_line(
            segment.start,
            segment.end,
            line_width,
            LineStyle::Solid,
            target,
            |t| (!accent.is_some_and(|span| span.contains(t))).then_some(FOREGROUND_COLOR),
        )?;
    }

    let Some((_, accent_color)) = accent else {
        return Ok(());
    };

    for segment in &segments {
        let Some(span) = segment.accent else {
            continue;
        };

        trace!(
            "Accent segment {} from {:.3} to {:.3} ({:?} -> {:?})",
            segment.index, span.start, span.end, segment.start, segment.end
        );

        draw_line(
            segment.start,
            segment.end,
            line_width,
            LineStyle::Solid,
            target,
            |t| span.contains(t).then_some(accent_color),
        )?;
    }

    Ok(())
}
