//! Error types for windowing and chart rendering
//!
//! Every variant describes malformed input. Callers get the error back
//! instead of a silently defaulted chart.

use thiserror_no_std::Error;

/// Error types for chart operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A non-empty series was required
    #[error("Series is empty")]
    EmptySeries,

    /// A sample price is NaN or infinite
    #[error("Non-finite price at index {index}")]
    NonFinitePrice {
        /// Index of the offending sample
        index: usize,
    },

    /// A sample timestamp is earlier than the one before it
    #[error("Timestamps out of order at index {index}")]
    UnorderedTimestamps {
        /// Index of the first out-of-order sample
        index: usize,
    },

    /// Raster width or height is zero
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// Stroke width outside the supported range
    #[error("Invalid line width: {width} px")]
    InvalidLineWidth {
        /// Requested stroke width in pixels
        width: u32,
    },

    /// Boundary index points past the end of the series
    #[error("Boundary index {index} exceeds series length {len}")]
    BoundaryOutOfRange {
        /// The requested boundary index
        index: usize,
        /// Length of the series
        len: usize,
    },
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
