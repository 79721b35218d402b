//! Desktop simulator for the inky ticker e-ink display.
//!
//! Loads price series from a mock or JSON feed, selects each symbol's
//! session window, renders the threshold-segmented charts with
//! `ticker-core` and composes a pHAT or wHAT frame, written to a PNG file
//! through `embedded-graphics-simulator` in place of the physical panel.
//!
//! ```text
//! ticker-simulator --display what --symbols AAPL MSFT BTC-USD --three-color
//! ticker-simulator --display phat --input quotes.json --output frame.png
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{error, info, warn};

use ticker_core::chart::ColorMode;
use ticker_core::config::ChartConfig;
use ticker_core::raster::Raster;
use ticker_core::session::SessionWindowSelector;

mod feed;
mod layout;

use feed::{JsonFeed, MockFeed, QuoteSource};
use layout::{ChartedQuote, Panel, compose_phat, compose_what};

/// Latest-session samples generated by the mock feed when not overridden
const DEFAULT_LATEST_SAMPLES: usize = 12;

#[derive(Parser, Debug)]
#[command(name = "ticker-simulator")]
#[command(about = "Render stock ticker frames for Inky pHAT/wHAT e-ink panels", long_about = None)]
#[command(version)]
struct Cli {
    /// Target panel
    #[arg(short, long, value_enum, default_value = "phat")]
    display: Panel,

    /// Stock symbol to display (pHAT)
    #[arg(long, conflicts_with = "symbols")]
    symbol: Option<String>,

    /// Stock symbols to display (wHAT, up to 3)
    #[arg(long, num_args = 1..)]
    symbols: Vec<String>,

    /// Use red for falling prices on three-color panels
    #[arg(long)]
    three_color: bool,

    /// JSON file with quotes to replay instead of mock data
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON chart configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Latest-session length at or below which the prior session is stitched in
    #[arg(long)]
    min_session_samples: Option<usize>,

    /// Number of prior-session samples to stitch in front of a short session
    #[arg(long)]
    stitched_tail: Option<usize>,

    /// Price line width in pixels (1 or 2)
    #[arg(long)]
    line_width: Option<u32>,

    /// Samples in the latest mock session
    #[arg(long, default_value_t = DEFAULT_LATEST_SAMPLES)]
    latest_samples: usize,

    /// Output PNG path. Defaults to inky_stocks_<display>.png
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let source: Box<dyn QuoteSource> = match &cli.input {
        Some(path) => Box::new(JsonFeed::from_path(path)?),
        None => Box::new(MockFeed::new(Local::now().date_naive(), cli.latest_samples)),
    };
    let Some(frame) = compose_frame(&cli, &config, source.as_ref())? else {
        warn!("No valid stock data to display");
        return Ok(());
    };

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(cli.display.default_output()));
    save_png(&frame, &output)?;
    info!("Wrote {}", output.display());

    Ok(())
}

/// Compose the frame for the requested panel.
///
/// Returns `None` when none of the wHAT symbols could be charted. On the
/// pHAT a symbol that fails to load is an error.
fn compose_frame(
    cli: &Cli,
    config: &ChartConfig,
    source: &dyn QuoteSource,
) -> Result<Option<Raster>> {
    let symbols = resolve_symbols(cli.display, cli.symbol.as_deref(), &cli.symbols);
    let selector = SessionWindowSelector::new(config.window);

    match cli.display {
        Panel::Phat => {
            let Some(symbol) = symbols.first() else {
                return Ok(None);
            };
            let quote = chart_quote(source, &selector, symbol)?;
            info!("Rendering {} for pHAT", quote.symbol);
            compose_phat(&quote, config).map(Some)
        }
        Panel::What => {
            let mut quotes = Vec::with_capacity(symbols.len());
            for symbol in &symbols {
                match chart_quote(source, &selector, symbol) {
                    Ok(quote) => quotes.push(quote),
                    Err(e) => error!("Skipping {symbol}: {e:#}"),
                }
            }
            if quotes.is_empty() {
                return Ok(None);
            }

            info!("Rendering {} symbols for wHAT", quotes.len());
            compose_what(&quotes, config).map(Some)
        }
    }
}

/// Config file values (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<ChartConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => ChartConfig::default(),
    };

    if cli.three_color {
        config.color_mode = ColorMode::ThreeColor;
    }
    if let Some(min_session_samples) = cli.min_session_samples {
        config.window.min_session_samples = min_session_samples;
    }
    if let Some(stitched_tail) = cli.stitched_tail {
        config.window.stitched_tail_len = stitched_tail;
    }
    if let Some(line_width) = cli.line_width {
        config.line_width = line_width;
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<ChartConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Upper-cased symbols to show, limited to what the panel can hold
fn resolve_symbols(panel: Panel, symbol: Option<&str>, symbols: &[String]) -> Vec<String> {
    let mut requested: Vec<String> = match symbol {
        Some(symbol) => vec![symbol.to_string()],
        None if !symbols.is_empty() => symbols.to_vec(),
        None => panel
            .default_symbols()
            .iter()
            .map(|symbol| symbol.to_string())
            .collect(),
    };
    requested.iter_mut().for_each(|symbol| *symbol = symbol.to_uppercase());

    let max = panel.max_symbols();
    if requested.len() > max {
        match panel {
            Panel::Phat => warn!("pHAT shows a single symbol, using {} only", requested[0]),
            Panel::What => warn!("wHAT shows at most {max} symbols, using the first {max}"),
        }
        requested.truncate(max);
    }

    requested
}

/// Fetch a symbol and select its session window
fn chart_quote(
    source: &dyn QuoteSource,
    selector: &SessionWindowSelector,
    symbol: &str,
) -> Result<ChartedQuote> {
    let quote = source.fetch(symbol)?;
    let window = selector
        .select(&quote.samples)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid price series for {symbol}"))?;
    let Some(summary) = window.summary() else {
        bail!("No current session data for {symbol}");
    };

    Ok(ChartedQuote {
        symbol: quote.symbol,
        name: quote.name,
        window,
        summary,
    })
}

/// Write the frame to a PNG the way the panel would show it
fn save_png(frame: &Raster, path: &Path) -> Result<()> {
    let mut display = SimulatorDisplay::<Rgb888>::new(frame.size());
    let Ok(()) = frame.blit(&mut display, Point::zero());

    display
        .to_rgb_output_image(&OutputSettingsBuilder::new().build())
        .save_png(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
