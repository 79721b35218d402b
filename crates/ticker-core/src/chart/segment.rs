//! Threshold crossing interpolation
//!
//! Decides which part of a line segment between two adjacent samples lies
//! below the reference price. Crossings are found by linear interpolation
//! in data space, so the accent color starts and stops exactly on the
//! reference price instead of at the nearest sample.

/// Fractional sub-range of a segment, `0.0` at the first sample and `1.0`
/// at the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentSpan {
    /// Where the below-reference part starts
    pub start: f64,
    /// Where the below-reference part ends
    pub end: f64,
}

impl AccentSpan {
    /// The whole segment
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    /// Create a span
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether fraction `t` falls inside the span, both ends included
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Part of the segment from price `p0` to price `p1` that lies below `reference`.
///
/// A price equal to the reference counts as at-or-above, so it is never
/// accented. Returns `None` when no part of the segment is below the
/// reference.
pub fn accent_span(p0: f64, p1: f64, reference: f64) -> Option<AccentSpan> {
    // Flat segment: all or nothing, and no division by zero below
    if p0 == p1 {
        return (p0 < reference).then_some(AccentSpan::FULL);
    }

    match (p0 < reference, p1 < reference) {
        (true, true) => Some(AccentSpan::FULL),
        (false, false) => None,
        // Crossing upward: accent from the start to the crossing
        (true, false) => Some(AccentSpan::new(0.0, crossing_fraction(p0, p1, reference))),
        // Crossing downward: accent from the crossing to the end
        (false, true) => Some(AccentSpan::new(crossing_fraction(p0, p1, reference), 1.0)),
    }
}

/// Fraction along the segment where the price equals `reference`.
///
/// Callers guarantee `p0 != p1`.
pub fn crossing_fraction(p0: f64, p1: f64, reference: f64) -> f64 {
    ((reference - p0) / (p1 - p0)).clamp(0.0, 1.0)
}
