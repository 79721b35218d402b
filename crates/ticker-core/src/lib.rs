//! Hardware-independent core library for the inky ticker
//!
//! This crate contains the platform-agnostic logic behind the e-ink price
//! chart: choosing the trading-session window out of a raw price series,
//! rendering that window as a threshold-segmented line chart into a
//! palette raster, and deriving the summary values (trend, percent change,
//! last price) that the display layout shows next to the chart.
//!
//! It is `#![no_std]` with `extern crate alloc` so the same code runs on a
//! display controller and on desktop hosts (for the simulator and tests).
//!
//! # Examples
//!
//! ```ignore
//! use ticker_core::chart::{ColorMode, RenderSpec, SegmentedSeriesRenderer};
//! use ticker_core::session::{SessionWindowSelector, WindowConfig};
//!
//! let window = SessionWindowSelector::new(WindowConfig::default()).select(&samples)?;
//! let renderer = SegmentedSeriesRenderer::new(RenderSpec::new(185, 80, ColorMode::ThreeColor))?;
//! let raster = renderer.render_window(&window)?;
//! ```

#![no_std]

extern crate alloc;

pub mod chart;
pub mod config;
pub mod error;
pub mod raster;
pub mod series;
pub mod session;
pub mod summary;

pub use error::{ChartError, ChartResult};
