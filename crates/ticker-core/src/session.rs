//! Trading-session window selection
//!
//! Price feeds deliver a few calendar days of samples so that weekends and
//! holidays are covered. The chart only shows the latest session; when that
//! session has barely started, the tail of the previous day is stitched in
//! front of it so the chart still has some shape.

extern crate alloc;

use alloc::vec::Vec;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::series::{Sample, validate_series};
use crate::summary::SessionSummary;

/// Latest-day sample count at or below which the prior day's tail is stitched in.
///
/// Eight 15-minute samples cover the first two hours of a session.
pub const DEFAULT_MIN_SESSION_SAMPLES: usize = 8;

/// Number of prior-day samples stitched in front of a short session.
pub const DEFAULT_STITCHED_TAIL_LEN: usize = 16;

/// Parameters of the window selection
///
/// Both values depend on the sampling cadence of the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Sessions with this many samples or fewer get a stitched tail
    pub min_session_samples: usize,
    /// Maximum number of prior samples to stitch
    pub stitched_tail_len: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_session_samples: DEFAULT_MIN_SESSION_SAMPLES,
            stitched_tail_len: DEFAULT_STITCHED_TAIL_LEN,
        }
    }
}

/// A windowed series and the index where the current session starts
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    series: Vec<Sample>,
    boundary_index: usize,
}

impl Window {
    /// Create a window, rejecting a boundary past the end of the series.
    pub fn new(series: Vec<Sample>, boundary_index: usize) -> ChartResult<Self> {
        if boundary_index > series.len() {
            return Err(ChartError::BoundaryOutOfRange {
                index: boundary_index,
                len: series.len(),
            });
        }

        Ok(Self {
            series,
            boundary_index,
        })
    }

    /// Window without current-session data: the boundary sits at the end.
    pub fn degenerate(series: Vec<Sample>) -> Self {
        let boundary_index = series.len();
        Self {
            series,
            boundary_index,
        }
    }

    /// All samples in the window
    pub fn series(&self) -> &[Sample] {
        &self.series
    }

    /// Index of the first current-session sample
    pub fn boundary_index(&self) -> usize {
        self.boundary_index
    }

    /// Samples stitched in from the prior day
    pub fn stitched_tail(&self) -> &[Sample] {
        &self.series[..self.boundary_index]
    }

    /// Samples of the current session
    pub fn session(&self) -> &[Sample] {
        &self.series[self.boundary_index..]
    }

    /// Whether a prior-day tail precedes the session
    pub fn has_stitched_tail(&self) -> bool {
        self.boundary_index > 0
    }

    /// Whether the window holds no current-session data
    pub fn is_degenerate(&self) -> bool {
        self.boundary_index == self.series.len()
    }

    /// Session opening price, the threshold for up/down coloring
    pub fn reference_price(&self) -> Option<f64> {
        self.series.get(self.boundary_index).map(|sample| sample.price)
    }

    /// First/last price and trend of the session
    pub fn summary(&self) -> Option<SessionSummary> {
        SessionSummary::from_session(self.session())
    }

    /// Split into the series and boundary index
    pub fn into_parts(self) -> (Vec<Sample>, usize) {
        (self.series, self.boundary_index)
    }
}

/// Picks the current trading session out of a multi-day series
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionWindowSelector {
    config: WindowConfig,
}

impl SessionWindowSelector {
    /// Create a selector with the given parameters
    pub const fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Get the selection parameters
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Select the window to chart.
    ///
    /// Returns the latest calendar day's samples. When that day has at most
    /// `min_session_samples` samples and earlier data exists, up to
    /// `stitched_tail_len` of the most recent earlier samples are prepended
    /// and the boundary index marks where the latest day begins.
    pub fn select(&self, series: &[Sample]) -> ChartResult<Window> {
        validate_series(series)?;

        let Some(latest_date) = series.last().map(Sample::date) else {
            return Err(ChartError::EmptySeries);
        };

        let split = series.partition_point(|sample| sample.date() < latest_date);
        let (prior, latest) = series.split_at(split);

        if latest.is_empty() {
            debug!("No samples on latest date {latest_date}, keeping full series");
            return Ok(Window::degenerate(series.to_vec()));
        }

        if latest.len() <= self.config.min_session_samples && !prior.is_empty() {
            let tail_start = prior.len().saturating_sub(self.config.stitched_tail_len);
            let tail = &prior[tail_start..];

            debug!(
                "Session on {} has {} samples, stitching {} prior samples",
                latest_date,
                latest.len(),
                tail.len()
            );

            let mut samples = Vec::with_capacity(tail.len() + latest.len());
            samples.extend_from_slice(tail);
            samples.extend_from_slice(latest);
            return Window::new(samples, tail.len());
        }

        debug!("Session on {} has {} samples", latest_date, latest.len());
        Window::new(latest.to_vec(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::session;
    use alloc::vec;

    fn flat(count: usize, price: f64) -> Vec<f64> {
        vec![price; count]
    }

    /// Three days: 26 samples on the 1st, 26 on the 2nd, `latest` on the 3rd
    fn three_days(latest: usize) -> Vec<Sample> {
        let mut series = session(1, &flat(26, 100.0));
        series.extend(session(2, &flat(26, 110.0)));
        series.extend(session(3, &flat(latest, 120.0)));
        series
    }

    #[test]
    fn test_long_session_is_returned_alone() {
        let series = three_days(20);
        let window = SessionWindowSelector::default().select(&series).unwrap();

        assert_eq!(window.boundary_index(), 0);
        assert_eq!(window.series(), &series[52..]);
        assert!(!window.has_stitched_tail());
        assert_eq!(window.reference_price(), Some(120.0));
    }

    #[test]
    fn test_session_just_above_threshold_is_not_stitched() {
        let series = three_days(DEFAULT_MIN_SESSION_SAMPLES + 1);
        let window = SessionWindowSelector::default().select(&series).unwrap();

        assert_eq!(window.boundary_index(), 0);
        assert_eq!(window.series().len(), DEFAULT_MIN_SESSION_SAMPLES + 1);
    }

    #[test]
    fn test_short_session_gets_stitched_tail() {
        let series = three_days(DEFAULT_MIN_SESSION_SAMPLES);
        let window = SessionWindowSelector::default().select(&series).unwrap();

        assert_eq!(window.boundary_index(), DEFAULT_STITCHED_TAIL_LEN);
        assert_eq!(
            window.series().len(),
            DEFAULT_STITCHED_TAIL_LEN + DEFAULT_MIN_SESSION_SAMPLES
        );
        // Tail comes from the most recent prior day only
        assert!(window.stitched_tail().iter().all(|s| s.price == 110.0));
        assert_eq!(window.stitched_tail(), &series[52 - 16..52]);
        assert_eq!(window.session(), &series[52..]);
        assert_eq!(window.reference_price(), Some(120.0));
    }

    #[test]
    fn test_short_prior_portion_is_taken_whole() {
        let mut series = session(1, &flat(5, 100.0));
        series.extend(session(2, &flat(3, 101.0)));

        let window = SessionWindowSelector::default().select(&series).unwrap();

        assert_eq!(window.boundary_index(), 5);
        assert_eq!(window.series(), series.as_slice());
    }

    #[test]
    fn test_short_session_without_prior_data() {
        let series = session(3, &flat(2, 50.0));
        let window = SessionWindowSelector::default().select(&series).unwrap();

        assert_eq!(window.boundary_index(), 0);
        assert_eq!(window.series(), series.as_slice());
    }

    #[test]
    fn test_custom_window_config() {
        let config = WindowConfig {
            min_session_samples: 20,
            stitched_tail_len: 4,
        };
        let series = three_days(20);
        let window = SessionWindowSelector::new(config).select(&series).unwrap();

        assert_eq!(window.boundary_index(), 4);
        assert_eq!(window.series().len(), 24);
        assert_eq!(window.series()[0], series[48]);
    }

    #[test]
    fn test_zero_tail_len_keeps_session_only() {
        let config = WindowConfig {
            min_session_samples: 8,
            stitched_tail_len: 0,
        };
        let series = three_days(3);
        let window = SessionWindowSelector::new(config).select(&series).unwrap();

        assert_eq!(window.boundary_index(), 0);
        assert_eq!(window.series(), &series[52..]);
    }

    #[test]
    fn test_boundary_always_starts_latest_date() {
        for latest in 1..=30 {
            let series = three_days(latest);
            let window = SessionWindowSelector::default().select(&series).unwrap();
            let first_session = window.series()[window.boundary_index()];
            assert_eq!(first_session, series[52], "latest = {latest}");
            if window.boundary_index() > 0 {
                let last_tail = window.series()[window.boundary_index() - 1];
                assert!(last_tail.date() < first_session.date());
            }
        }
    }

    #[test]
    fn test_select_rejects_empty_series() {
        assert_eq!(
            SessionWindowSelector::default().select(&[]),
            Err(ChartError::EmptySeries)
        );
    }

    #[test]
    fn test_select_rejects_unordered_series() {
        let mut series = session(2, &flat(3, 1.0));
        series.extend(session(1, &flat(3, 1.0)));
        assert_eq!(
            SessionWindowSelector::default().select(&series),
            Err(ChartError::UnorderedTimestamps { index: 3 })
        );
    }

    #[test]
    fn test_window_new_rejects_boundary_past_end() {
        let series = session(1, &flat(3, 1.0));
        assert_eq!(
            Window::new(series, 4),
            Err(ChartError::BoundaryOutOfRange { index: 4, len: 3 })
        );
    }

    #[test]
    fn test_degenerate_window() {
        let series = session(1, &flat(3, 1.0));
        let window = Window::degenerate(series.clone());

        assert!(window.is_degenerate());
        assert_eq!(window.boundary_index(), 3);
        assert_eq!(window.reference_price(), None);
        assert!(window.session().is_empty());
        assert_eq!(window.summary(), None);
        assert_eq!(window.into_parts(), (series, 3));
    }

    #[test]
    fn test_window_config_from_partial_json() {
        let config: WindowConfig = serde_json::from_str(r#"{"stitched_tail_len": 32}"#).unwrap();
        assert_eq!(config.min_session_samples, DEFAULT_MIN_SESSION_SAMPLES);
        assert_eq!(config.stitched_tail_len, 32);
    }
}
