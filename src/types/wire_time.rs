//! Capture timestamps with sub-second precision

use serde::{Deserialize, Serialize};

/// Arrival timestamp of a captured frame.
///
/// Mirrors the capture layer's `timeval`: whole seconds since the Unix
/// epoch plus microseconds. Bitrate math only uses whole seconds, so the
/// microsecond part is carried for consumers, not for windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireTime {
    /// Whole seconds since the Unix epoch
    pub secs: i64,

    /// Microseconds within the second (0..1_000_000)
    pub micros: u32,
}

impl WireTime {
    /// Create a timestamp from seconds and microseconds.
    pub fn new(secs: i64, micros: u32) -> Self {
        Self { secs, micros }
    }

    /// Whole seconds elapsed since `earlier`.
    ///
    /// Returns 0 when `earlier` is not actually earlier, so degenerate
    /// orderings never produce a negative span.
    pub fn whole_secs_since(self, earlier: WireTime) -> u64 {
        let span = self.secs - earlier.secs;
        if span > 0 { span as u64 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_second_spans() {
        let first = WireTime::new(100, 900_000);
        let last = WireTime::new(103, 100_000);
        assert_eq!(last.whole_secs_since(first), 3);
    }

    #[test]
    fn same_second_span_is_zero() {
        let first = WireTime::new(100, 1);
        let last = WireTime::new(100, 999_999);
        assert_eq!(last.whole_secs_since(first), 0);
    }

    #[test]
    fn inverted_span_clamps_to_zero() {
        let first = WireTime::new(200, 0);
        let last = WireTime::new(100, 0);
        assert_eq!(last.whole_secs_since(first), 0);
    }
}
