//! Frame layouts for the two supported e-ink panels
//!
//! The pHAT (250x122) shows one symbol: title across the top, a three-row
//! info column on the right (trend arrow, percent change, last price) and
//! the chart below the title. The wHAT (400x300) stacks up to three rows,
//! each with title, arrow, percent change and price on the left and the
//! chart on the right.

use anyhow::Result;
use clap::ValueEnum;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_7X13_BOLD, FONT_10X20};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use ticker_core::chart::constants::{BACKGROUND_COLOR, FOREGROUND_COLOR};
use ticker_core::chart::{ColorMode, SegmentedSeriesRenderer};
use ticker_core::config::ChartConfig;
use ticker_core::raster::{InkColor, Raster};
use ticker_core::session::Window;
use ticker_core::summary::{SessionSummary, display_title, format_percent_change, format_price};

// ============================================================================
// pHAT Layout
// ============================================================================

/// pHAT panel width in pixels
pub const PHAT_WIDTH_PX: u32 = 250;

/// pHAT panel height in pixels
pub const PHAT_HEIGHT_PX: u32 = 122;

/// Width of the info column on the right in pixels
const PHAT_INFO_PANEL_WIDTH_PX: u32 = 65;

/// Height of each info column row in pixels
const PHAT_INFO_ROW_HEIGHT_PX: u32 = 40;

/// Chart size below the title in pixels
const PHAT_CHART_SIZE: Size = Size::new(185, 80);

/// Title offset from the top-left corner in pixels
const PHAT_TITLE_OFFSET_PX: i32 = 8;

/// Longest title shown on the pHAT
const PHAT_TITLE_MAX_CHARS: usize = 16;

/// Padding around the arrow inside its info row in pixels
const PHAT_ARROW_PADDING_PX: u32 = 8;

/// Right margin for right-aligned info text in pixels
const INFO_TEXT_MARGIN_RIGHT_PX: i32 = 6;

// ============================================================================
// wHAT Layout
// ============================================================================

/// wHAT panel width in pixels
pub const WHAT_WIDTH_PX: u32 = 400;

/// wHAT panel height in pixels
pub const WHAT_HEIGHT_PX: u32 = 300;

/// Maximum number of symbol rows on the wHAT
pub const WHAT_MAX_ROWS: usize = 3;

/// Height of one symbol row in pixels (plus a 1 px separator)
const WHAT_ROW_HEIGHT_PX: u32 = 99;

/// Padding inside each row in pixels
const WHAT_ROW_PADDING_PX: u32 = 12;

/// Content height inside a row's padding in pixels
const WHAT_CONTENT_HEIGHT_PX: u32 = WHAT_ROW_HEIGHT_PX - 2 * WHAT_ROW_PADDING_PX;

/// Chart size in each row in pixels
const WHAT_CHART_SIZE: Size = Size::new(150, WHAT_CONTENT_HEIGHT_PX);

/// Height reserved for the row title in pixels
const WHAT_TITLE_HEIGHT_PX: u32 = 26;

/// Gap between title and info line in pixels
const WHAT_TITLE_GAP_PX: u32 = 4;

/// Longest title shown on a wHAT row
const WHAT_TITLE_MAX_CHARS: usize = 18;

/// Trend arrow size in pixels
const WHAT_ARROW_SIZE_PX: u32 = 24;

/// Gap between arrow and percent text in pixels
const WHAT_ARROW_GAP_PX: i32 = 16;

/// Offset from the percent text to the price text in pixels
const WHAT_PRICE_OFFSET_PX: i32 = 70;

/// Nominal text height used for vertical centring in pixels
const WHAT_TEXT_HEIGHT_PX: u32 = 20;

/// Supported e-ink panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    /// 250x122, one symbol
    Phat,
    /// 400x300, up to three symbols
    What,
}

impl Panel {
    /// Panel resolution
    pub const fn size(self) -> Size {
        match self {
            Self::Phat => Size::new(PHAT_WIDTH_PX, PHAT_HEIGHT_PX),
            Self::What => Size::new(WHAT_WIDTH_PX, WHAT_HEIGHT_PX),
        }
    }

    /// How many symbols fit on the panel
    pub const fn max_symbols(self) -> usize {
        match self {
            Self::Phat => 1,
            Self::What => WHAT_MAX_ROWS,
        }
    }

    /// Symbols shown when none are requested
    pub const fn default_symbols(self) -> &'static [&'static str] {
        match self {
            Self::Phat => &["^GSPC"],
            Self::What => &["^GSPC", "^FTSE", "BTC-USD"],
        }
    }

    /// File the frame is written to when no output path is given
    pub const fn default_output(self) -> &'static str {
        match self {
            Self::Phat => "inky_stocks_phat.png",
            Self::What => "inky_stocks_what.png",
        }
    }
}

/// A symbol with its selected session window, ready to lay out
#[derive(Debug, Clone)]
pub struct ChartedQuote {
    /// Ticker symbol
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Session window to chart
    pub window: Window,
    /// Session trend values
    pub summary: SessionSummary,
}

/// Compose the pHAT frame for one quote
pub fn compose_phat(quote: &ChartedQuote, config: &ChartConfig) -> Result<Raster> {
    let mut frame = Raster::new(Panel::Phat.size(), BACKGROUND_COLOR);

    let title = display_title(&quote.symbol, &quote.name, PHAT_TITLE_MAX_CHARS);
    draw_text(
        &mut frame,
        &title,
        Point::new(PHAT_TITLE_OFFSET_PX, PHAT_TITLE_OFFSET_PX),
        &FONT_10X20,
    );

    let info_x = (PHAT_WIDTH_PX - PHAT_INFO_PANEL_WIDTH_PX) as i32;
    let row_size = Size::new(PHAT_INFO_PANEL_WIDTH_PX, PHAT_INFO_ROW_HEIGHT_PX);
    let row = |index: i32| {
        Rectangle::new(
            Point::new(info_x, index * PHAT_INFO_ROW_HEIGHT_PX as i32),
            row_size,
        )
    };

    // Arrow hugs the right side of its row, vertically centred
    let arrow_cell = row(0);
    let arrow_size = (row_size.width - 2 * PHAT_ARROW_PADDING_PX)
        .min(row_size.height - 2 * PHAT_ARROW_PADDING_PX);
    let arrow_top_left = arrow_cell.top_left
        + Point::new(
            (row_size.width - arrow_size - (PHAT_ARROW_PADDING_PX + 2)) as i32,
            ((row_size.height - arrow_size) / 2) as i32,
        );
    draw_trend_arrow(
        &mut frame,
        arrow_top_left,
        arrow_size,
        quote.summary.is_up,
        config.color_mode,
    );

    draw_right_aligned(&mut frame, &percent_text(&quote.summary), row(1), &FONT_10X20);
    draw_right_aligned(
        &mut frame,
        &format_price(quote.summary.last_price),
        row(2),
        &FONT_7X13_BOLD,
    );

    draw_chart(
        &mut frame,
        &quote.window,
        config,
        PHAT_CHART_SIZE,
        Point::new(0, PHAT_INFO_ROW_HEIGHT_PX as i32),
    )?;

    Ok(frame)
}

/// Compose the wHAT frame for up to three quotes, separated by 1 px lines.
///
/// Quotes beyond the third are ignored.
pub fn compose_what(quotes: &[ChartedQuote], config: &ChartConfig) -> Result<Raster> {
    let mut frame = Raster::new(Panel::What.size(), BACKGROUND_COLOR);
    let rows = quotes.len().min(WHAT_MAX_ROWS);

    for (index, quote) in quotes.iter().take(rows).enumerate() {
        let row_top = index as i32 * (WHAT_ROW_HEIGHT_PX as i32 + 1);
        draw_what_row(&mut frame, quote, config, row_top)?;

        if index + 1 < rows {
            let line_y = row_top + WHAT_ROW_HEIGHT_PX as i32;
            let Ok(()) = Line::new(
                Point::new(0, line_y),
                Point::new(WHAT_WIDTH_PX as i32 - 1, line_y),
            )
            .into_styled(PrimitiveStyle::with_stroke(FOREGROUND_COLOR, 1))
            .draw(&mut frame);
        }
    }

    Ok(frame)
}

fn draw_what_row(
    frame: &mut Raster,
    quote: &ChartedQuote,
    config: &ChartConfig,
    row_top: i32,
) -> Result<()> {
    let padding = WHAT_ROW_PADDING_PX as i32;

    let title = display_title(&quote.symbol, &quote.name, WHAT_TITLE_MAX_CHARS);
    draw_text(frame, &title, Point::new(padding, row_top + padding), &FONT_10X20);

    let info_y = row_top + padding + (WHAT_TITLE_HEIGHT_PX + WHAT_TITLE_GAP_PX) as i32;
    let remaining_height = WHAT_CONTENT_HEIGHT_PX - WHAT_TITLE_HEIGHT_PX - WHAT_TITLE_GAP_PX;

    let arrow_y = info_y + ((remaining_height - WHAT_ARROW_SIZE_PX) / 2) as i32;
    draw_trend_arrow(
        frame,
        Point::new(padding, arrow_y),
        WHAT_ARROW_SIZE_PX,
        quote.summary.is_up,
        config.color_mode,
    );

    let text_x = padding + WHAT_ARROW_SIZE_PX as i32 + WHAT_ARROW_GAP_PX;
    let text_y = info_y + ((remaining_height - WHAT_TEXT_HEIGHT_PX) / 2) as i32;
    draw_text(
        frame,
        &percent_text(&quote.summary),
        Point::new(text_x, text_y),
        &FONT_10X20,
    );
    draw_text(
        frame,
        &format_price(quote.summary.last_price),
        Point::new(text_x + WHAT_PRICE_OFFSET_PX, text_y),
        &FONT_10X20,
    );

    let chart_x = (WHAT_WIDTH_PX - WHAT_CHART_SIZE.width - WHAT_ROW_PADDING_PX) as i32;
    let chart_offset_y = ((WHAT_CONTENT_HEIGHT_PX - WHAT_CHART_SIZE.height) / 2) as i32;
    let chart_top_left = Point::new(chart_x, row_top + padding + chart_offset_y);
    draw_chart(frame, &quote.window, config, WHAT_CHART_SIZE, chart_top_left)
}

/// Render the chart for `window` and paste it into the frame
fn draw_chart(
    frame: &mut Raster,
    window: &Window,
    config: &ChartConfig,
    size: Size,
    top_left: Point,
) -> Result<()> {
    let spec = config
        .render_spec(size.width, size.height)
        .map_err(anyhow::Error::msg)?;
    let chart = SegmentedSeriesRenderer::new(spec)
        .and_then(|renderer| renderer.render_window(window))
        .map_err(anyhow::Error::msg)?;

    let Ok(()) = chart.blit(frame, top_left);
    Ok(())
}

/// Percent change text, or a placeholder when the open price is zero
fn percent_text(summary: &SessionSummary) -> String {
    summary
        .percent_change()
        .map(format_percent_change)
        .unwrap_or_else(|| String::from("--"))
}

/// Filled triangle pointing up (black) or down (accent color when available)
fn draw_trend_arrow(
    frame: &mut Raster,
    top_left: Point,
    size: u32,
    is_up: bool,
    color_mode: ColorMode,
) {
    let size = size as i32;
    let Point { x, y } = top_left;

    let (triangle, color) = if is_up {
        (
            Triangle::new(
                Point::new(x + size / 2, y),
                Point::new(x, y + size),
                Point::new(x + size, y + size),
            ),
            FOREGROUND_COLOR,
        )
    } else {
        (
            Triangle::new(
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size / 2, y + size),
            ),
            color_mode.accent().unwrap_or(FOREGROUND_COLOR),
        )
    };

    let Ok(()) = triangle
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(frame);
}

/// Draw text with its top-left corner at `position`
fn draw_text(frame: &mut Raster, text: &str, position: Point, font: &'static MonoFont<'static>) {
    let style = MonoTextStyle::new(font, InkColor::Black);
    let text = Text::with_baseline(text, position, style, Baseline::Top);
    let Ok(_) = text.draw(frame);
}

/// Draw text right-aligned and vertically centred in `cell`
fn draw_right_aligned(
    frame: &mut Raster,
    text: &str,
    cell: Rectangle,
    font: &'static MonoFont<'static>,
) {
    let style = MonoTextStyle::new(font, InkColor::Black);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Middle)
        .build();
    let anchor = Point::new(
        cell.top_left.x + cell.size.width as i32 - INFO_TEXT_MARGIN_RIGHT_PX,
        cell.top_left.y + cell.size.height as i32 / 2,
    );
    let text = Text::with_text_style(text, anchor, style, text_style);
    let Ok(_) = text.draw(frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ticker_core::series::Sample;

    fn quote(symbol: &str, prices: &[f64], boundary_index: usize) -> ChartedQuote {
        let open = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .unwrap();
        let samples: Vec<Sample> = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                Sample::new(open + chrono::TimeDelta::minutes(15 * i as i64), price)
            })
            .collect();
        let window = Window::new(samples, boundary_index).unwrap();
        let summary = window.summary().unwrap();
        ChartedQuote {
            symbol: symbol.to_string(),
            name: format!("{symbol} Corp"),
            window,
            summary,
        }
    }

    fn three_color() -> ChartConfig {
        ChartConfig {
            color_mode: ColorMode::ThreeColor,
            ..ChartConfig::default()
        }
    }

    fn area_count(frame: &Raster, area: Rectangle, color: InkColor) -> usize {
        area.points()
            .filter(|&point| frame.pixel(point) == Some(color))
            .count()
    }

    #[test]
    fn test_phat_frame_size_and_chart_area() {
        let frame = compose_phat(&quote("ABC", &[10.0, 11.0, 10.5, 12.0], 0), &three_color())
            .unwrap();
        assert_eq!(frame.size(), Size::new(250, 122));

        let chart_area = Rectangle::new(Point::new(0, 40), PHAT_CHART_SIZE);
        assert!(area_count(&frame, chart_area, InkColor::Black) > 0);
    }

    #[test]
    fn test_phat_down_arrow_uses_accent_in_three_color() {
        let falling = quote("ABC", &[12.0, 11.0, 11.5, 10.0], 0);
        let arrow_area = Rectangle::new(Point::new(185, 0), Size::new(65, 40));

        let frame = compose_phat(&falling, &three_color()).unwrap();
        assert!(area_count(&frame, arrow_area, InkColor::Red) > 0);

        let frame = compose_phat(&falling, &ChartConfig::default()).unwrap();
        assert_eq!(frame.count(InkColor::Red), 0);
        assert!(area_count(&frame, arrow_area, InkColor::Black) > 0);
    }

    #[test]
    fn test_phat_up_arrow_is_black() {
        let rising = quote("ABC", &[10.0, 11.0, 11.5, 12.0], 0);
        let frame = compose_phat(&rising, &three_color()).unwrap();
        let arrow_area = Rectangle::new(Point::new(185, 0), Size::new(65, 40));

        assert_eq!(area_count(&frame, arrow_area, InkColor::Red), 0);
        assert!(area_count(&frame, arrow_area, InkColor::Black) > 0);
    }

    #[test]
    fn test_what_rows_are_separated() {
        let quotes = [
            quote("A", &[1.0, 2.0, 3.0], 0),
            quote("B", &[3.0, 2.0, 1.0], 0),
            quote("C", &[2.0, 2.5, 2.0], 0),
        ];
        let frame = compose_what(&quotes, &three_color()).unwrap();
        assert_eq!(frame.size(), Size::new(400, 300));

        for y in [99, 199] {
            assert!(
                (0..400).all(|x| frame.pixel(Point::new(x, y)) == Some(InkColor::Black)),
                "separator at y = {y}"
            );
        }
    }

    #[test]
    fn test_what_ignores_extra_quotes_and_omits_last_separator() {
        let quotes: Vec<ChartedQuote> = (0..4)
            .map(|i| quote("Q", &[1.0, 2.0 + i as f64], 0))
            .collect();
        let frame = compose_what(&quotes, &ChartConfig::default()).unwrap();

        assert!((0..400).any(|x| frame.pixel(Point::new(x, 299)) != Some(InkColor::Black)));

        let single = compose_what(&quotes[..1], &ChartConfig::default()).unwrap();
        assert!((0..400).any(|x| single.pixel(Point::new(x, 99)) != Some(InkColor::Black)));
    }

    #[test]
    fn test_what_chart_is_right_aligned() {
        let frame = compose_what(&[quote("A", &[1.0, 3.0, 2.0], 0)], &ChartConfig::default())
            .unwrap();
        let chart_area = Rectangle::new(Point::new(238, 12), WHAT_CHART_SIZE);
        assert!(area_count(&frame, chart_area, InkColor::Black) > 0);
    }

    #[test]
    fn test_invalid_line_width_is_reported() {
        let config = ChartConfig {
            line_width: 9,
            ..ChartConfig::default()
        };
        assert!(compose_phat(&quote("A", &[1.0, 2.0], 0), &config).is_err());
    }

    #[test]
    fn test_panel_metadata() {
        assert_eq!(Panel::Phat.size(), Size::new(250, 122));
        assert_eq!(Panel::What.max_symbols(), 3);
        assert_eq!(Panel::What.default_symbols(), &["^GSPC", "^FTSE", "BTC-USD"]);
        assert_eq!(Panel::Phat.default_output(), "inky_stocks_phat.png");
    }
}
