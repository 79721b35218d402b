//! Price samples and series validation

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// A single price observation
///
/// The timestamp is exchange-local wall-clock time; its calendar date is
/// what groups samples into trading sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time of the observation
    pub timestamp: NaiveDateTime,
    /// Observed price
    pub price: f64,
}

impl Sample {
    /// Create a new sample
    pub const fn new(timestamp: NaiveDateTime, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Calendar date the sample belongs to
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Check that a series is non-empty, has finite prices and ordered timestamps.
pub fn validate_series(series: &[Sample]) -> ChartResult<()> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    for (index, sample) in series.iter().enumerate() {
        if !sample.price.is_finite() {
            return Err(ChartError::NonFinitePrice { index });
        }
    }

    if let Some(index) = series
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(ChartError::UnorderedTimestamps { index: index + 1 });
    }

    Ok(())
}

/// Lowest and highest price in a series, `None` when empty
pub fn price_range(series: &[Sample]) -> Option<(f64, f64)> {
    let first = series.first()?.price;
    Some(
        series
            .iter()
            .skip(1)
            .fold((first, first), |(min, max), sample| {
                (min.min(sample.price), max.max(sample.price))
            }),
    )
}
