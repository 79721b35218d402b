//! Session summary values and the text shown next to the chart
//!
//! The layout draws a trend arrow, the percent change since the session
//! opened and the last price. These depend only on the session portion of a
//! [`Window`](crate::session::Window), not on the rendered chart.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::series::Sample;

/// Percent changes at or beyond this magnitude drop their decimal place
pub const WHOLE_PERCENT_THRESHOLD: f64 = 10.0;

/// Prices at or above this value are shown without cents
pub const WHOLE_PRICE_THRESHOLD: f64 = 10_000.0;

/// Opening and latest price of the current session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    /// Price of the first session sample (the reference price)
    pub first_price: f64,
    /// Price of the most recent sample
    pub last_price: f64,
    /// Whether the session is trading up
    pub is_up: bool,
}

impl SessionSummary {
    /// Summarize a session, `None` when it has no samples.
    ///
    /// A single-sample session counts as up.
    pub fn from_session(session: &[Sample]) -> Option<Self> {
        let first_price = session.first()?.price;
        let last_price = session.last()?.price;
        let is_up = if session.len() > 1 {
            last_price > first_price
        } else {
            true
        };

        Some(Self {
            first_price,
            last_price,
            is_up,
        })
    }

    /// Change since the session opened, in percent.
    ///
    /// `None` when the opening price is zero.
    pub fn percent_change(&self) -> Option<f64> {
        if self.first_price == 0.0 {
            return None;
        }
        Some((self.last_price - self.first_price) / self.first_price * 100.0)
    }
}

/// Format a percent change such as `+1.5%`, `-0.3%` or `+12%`.
pub fn format_percent_change(percent: f64) -> String {
    let sign = if percent >= 0.0 { "+" } else { "" };
    if percent >= WHOLE_PERCENT_THRESHOLD || percent <= -WHOLE_PERCENT_THRESHOLD {
        // Truncates toward zero
        format!("{sign}{}%", percent as i64)
    } else {
        format!("{sign}{percent:.1}%")
    }
}

/// Format a price with two decimals, or none for large prices.
pub fn format_price(price: f64) -> String {
    if price >= WHOLE_PRICE_THRESHOLD {
        format!("{price:.0}")
    } else {
        format!("{price:.2}")
    }
}

/// Pick the longest title that fits in `max_chars`.
///
/// Tries `"{name} ({symbol})"`, then the name alone, then the symbol.
pub fn display_title(symbol: &str, name: &str, max_chars: usize) -> String {
    let full = format!("{name} ({symbol})");
    if full.chars().count() <= max_chars {
        full
    } else if name.chars().count() <= max_chars {
        String::from(name)
    } else {
        String::from(symbol)
    }
}
