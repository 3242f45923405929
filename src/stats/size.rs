//! Frame size statistics for one capture window

use crate::types::{FrameRecord, WireTime};

/// Accumulates frame size statistics within the current window.
///
/// Tracks cumulative size, packet count, size extremes, and the first/last
/// arrival timestamps used to derive the window's bitrate. Invariant:
/// after `n` calls to [`accumulate`](Self::accumulate) since the last
/// reset, `packet_count() == n` and `total_bytes()` is the exact sum of
/// the observed wire lengths.
#[derive(Debug, Default)]
pub struct SizeAccumulator {
    total_bytes: u64,
    packet_count: u64,
    largest: u32,
    smallest: Option<u32>,
    first: Option<WireTime>,
    last: Option<WireTime>,
}

impl SizeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame into the window statistics.
    pub fn accumulate(&mut self, frame: &FrameRecord) {
        let length = frame.wire_length;

        self.total_bytes += u64::from(length);
        self.packet_count += 1;
        self.largest = self.largest.max(length);
        self.smallest = Some(match self.smallest {
            Some(smallest) => smallest.min(length),
            None => length,
        });

        if self.first.is_none() {
            self.first = Some(frame.timestamp);
        }
        self.last = Some(frame.timestamp);
    }

    /// Sum of wire lengths over the window, in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of frames accumulated since the last reset.
    pub fn packet_count(&self) -> u64 {
        self.packet_count
    }

    /// Largest wire length seen, 0 before the first frame.
    pub fn largest(&self) -> u32 {
        self.largest
    }

    /// Smallest wire length seen, absent before the first frame.
    pub fn smallest(&self) -> Option<u32> {
        self.smallest
    }

    /// Mean transfer rate in kilobytes per second, integer-truncating.
    ///
    /// The elapsed time is the whole-second span between the first and
    /// last frame. A window whose frames all arrive within the same whole
    /// second reports 0 even if bytes were transferred; that approximation
    /// is part of the contract, not a division-by-zero fallback alone.
    pub fn bitrate_kbps(&self) -> u64 {
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return 0;
        };

        let elapsed = last.whole_secs_since(first);
        if elapsed == 0 { 0 } else { (self.total_bytes / elapsed) / 1000 }
    }

    /// Mean frame size in bytes, 0 for an empty window.
    pub fn avg_frame_size(&self) -> u64 {
        if self.packet_count == 0 { 0 } else { self.total_bytes / self.packet_count }
    }

    /// Clear all statistics back to the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sized_frame, sized_frame_at};
    use proptest::prelude::*;

    #[test]
    fn accumulates_totals_and_extremes() {
        let mut acc = SizeAccumulator::new();
        for length in [100, 300, 200] {
            acc.accumulate(&sized_frame(length));
        }

        assert_eq!(acc.total_bytes(), 600);
        assert_eq!(acc.packet_count(), 3);
        assert_eq!(acc.largest(), 300);
        assert_eq!(acc.smallest(), Some(100));
        assert_eq!(acc.avg_frame_size(), 200);
    }

    #[test]
    fn empty_window_degrades_to_zero() {
        let acc = SizeAccumulator::new();
        assert_eq!(acc.avg_frame_size(), 0);
        assert_eq!(acc.bitrate_kbps(), 0);
        assert_eq!(acc.smallest(), None);
        assert_eq!(acc.largest(), 0);
    }

    #[test]
    fn bitrate_uses_whole_second_span() {
        let mut acc = SizeAccumulator::new();
        acc.accumulate(&sized_frame_at(500_000, 10, 0));
        acc.accumulate(&sized_frame_at(500_000, 11, 500_000));
        acc.accumulate(&sized_frame_at(2_000_000, 12, 0));

        // 3_000_000 bytes over 2 whole seconds = 1500 kB/s
        assert_eq!(acc.bitrate_kbps(), 1500);
    }

    #[test]
    fn sub_second_window_reports_zero_bitrate() {
        let mut acc = SizeAccumulator::new();
        acc.accumulate(&sized_frame_at(1_000_000, 42, 100));
        acc.accumulate(&sized_frame_at(1_000_000, 42, 900_000));
        assert_eq!(acc.bitrate_kbps(), 0);
    }

    #[test]
    fn single_frame_reports_zero_bitrate() {
        let mut acc = SizeAccumulator::new();
        acc.accumulate(&sized_frame(1500));
        assert_eq!(acc.bitrate_kbps(), 0);
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut acc = SizeAccumulator::new();
        acc.accumulate(&sized_frame(64));
        acc.reset();

        assert_eq!(acc.total_bytes(), 0);
        assert_eq!(acc.packet_count(), 0);
        assert_eq!(acc.largest(), 0);
        assert_eq!(acc.smallest(), None);
        assert_eq!(acc.avg_frame_size(), 0);
        assert_eq!(acc.bitrate_kbps(), 0);

        // First frame after reset re-seeds the extremes
        acc.accumulate(&sized_frame(9000));
        assert_eq!(acc.smallest(), Some(9000));
        assert_eq!(acc.largest(), 9000);
    }

    proptest! {
        #[test]
        fn prop_totals_match_the_exact_sum(lengths in prop::collection::vec(1u32..65_515, 1..200)) {
            let mut acc = SizeAccumulator::new();
            for &length in &lengths {
                acc.accumulate(&sized_frame(length));
            }

            let expected: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
            prop_assert_eq!(acc.total_bytes(), expected);
            prop_assert_eq!(acc.packet_count(), lengths.len() as u64);
            prop_assert_eq!(acc.largest(), *lengths.iter().max().unwrap());
            prop_assert_eq!(acc.smallest(), Some(*lengths.iter().min().unwrap()));

            // Extremes bound every observation
            for &length in &lengths {
                prop_assert!(acc.smallest().unwrap() <= length);
                prop_assert!(length <= acc.largest());
            }
        }
    }
}
