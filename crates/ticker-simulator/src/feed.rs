//! Market data sources for the simulator
//!
//! Stands in for the network price feed. [`MockFeed`] synthesises a few
//! days of 15-minute samples; [`JsonFeed`] replays quotes saved to a file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Days, NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use ticker_core::series::Sample;

/// Minutes between samples
const SAMPLE_INTERVAL_MINUTES: i64 = 15;

/// Samples in a full 09:30-16:00 session at 15-minute cadence
const SAMPLES_PER_SESSION: usize = 26;

/// Complete sessions generated before the latest one
const MOCK_PRIOR_SESSIONS: u64 = 3;

/// Price series and display name for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Ticker symbol, e.g. `^GSPC`
    pub symbol: String,
    /// Display name, e.g. `S&P 500`
    pub name: String,
    /// Samples in time order, possibly spanning several days
    pub samples: Vec<Sample>,
}

/// Something that can provide a quote for a symbol
pub trait QuoteSource {
    /// Fetch the quote for `symbol`
    fn fetch(&self, symbol: &str) -> Result<MarketQuote>;
}

/// Quotes loaded from a JSON file holding a list of [`MarketQuote`]s
#[derive(Debug, Clone, Default)]
pub struct JsonFeed {
    quotes: Vec<MarketQuote>,
}

impl JsonFeed {
    /// Load quotes from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open quotes file {}", path.display()))?;
        let quotes = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse quotes file {}", path.display()))?;
        Ok(Self { quotes })
    }

    /// Parse quotes from a JSON string
    pub fn parse(json: &str) -> Result<Self> {
        let quotes = serde_json::from_str(json).context("Failed to parse quotes")?;
        Ok(Self { quotes })
    }
}

impl QuoteSource for JsonFeed {
    fn fetch(&self, symbol: &str) -> Result<MarketQuote> {
        match self
            .quotes
            .iter()
            .find(|quote| quote.symbol.eq_ignore_ascii_case(symbol))
        {
            Some(quote) if !quote.samples.is_empty() => Ok(quote.clone()),
            _ => bail!("No market data available for {symbol}."),
        }
    }
}

/// Generates synthetic trading sessions that vary smoothly over time.
///
/// Output depends only on the symbol and the configured dates, so the same
/// invocation always produces the same frame.
#[derive(Debug, Clone)]
pub struct MockFeed {
    /// Date of the latest (possibly partial) session
    latest_date: NaiveDate,
    /// Number of samples in the latest session
    latest_samples: usize,
}

impl MockFeed {
    /// Create a feed whose latest session has `latest_samples` samples.
    ///
    /// The sample count is capped at a full session.
    pub fn new(latest_date: NaiveDate, latest_samples: usize) -> Self {
        Self {
            latest_date,
            latest_samples: latest_samples.min(SAMPLES_PER_SESSION),
        }
    }

    fn session_samples(
        &self,
        date: NaiveDate,
        count: usize,
        first_tick: usize,
        base_price: f64,
        phase: f64,
    ) -> Vec<Sample> {
        let open = date.and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default());

        (0..count)
            .map(|i| {
                let t = (first_tick + i) as f64;
                let price = base_price
                    * (1.0 + 0.012 * (t / 7.0 + phase).sin() + 0.004 * (t / 2.3 + phase).cos());
                let timestamp = open + TimeDelta::minutes(SAMPLE_INTERVAL_MINUTES * i as i64);
                Sample::new(timestamp, price)
            })
            .collect()
    }
}

impl QuoteSource for MockFeed {
    fn fetch(&self, symbol: &str) -> Result<MarketQuote> {
        let seed = symbol_seed(symbol);
        let base_price = 20.0 + (seed % 6_000) as f64;
        let phase = (seed % 628) as f64 / 100.0;

        let mut samples = Vec::with_capacity(
            MOCK_PRIOR_SESSIONS as usize * SAMPLES_PER_SESSION + self.latest_samples,
        );

        for days_back in (1..=MOCK_PRIOR_SESSIONS).rev() {
            let Some(date) = self.latest_date.checked_sub_days(Days::new(days_back)) else {
                bail!("Mock date out of range: {} - {days_back} days", self.latest_date);
            };
            let first_tick = samples.len();
            samples.extend(self.session_samples(
                date,
                SAMPLES_PER_SESSION,
                first_tick,
                base_price,
                phase,
            ));
        }

        let first_tick = samples.len();
        samples.extend(self.session_samples(
            self.latest_date,
            self.latest_samples,
            first_tick,
            base_price,
            phase,
        ));

        Ok(MarketQuote {
            symbol: symbol.to_string(),
            name: display_name(symbol).to_string(),
            samples,
        })
    }
}

/// Well-known names for the default symbols
fn display_name(symbol: &str) -> &str {
    match symbol {
        "^GSPC" => "S&P 500",
        "^FTSE" => "FTSE 100",
        "BTC-USD" => "Bitcoin USD",
        other => other,
    }
}

/// FNV-1a hash of the symbol, used to vary mock prices per symbol
fn symbol_seed(symbol: &str) -> u64 {
    symbol.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
