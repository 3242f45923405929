//! Core types for captured traffic representation.
//!
//! This module provides the foundational data structures shared by the
//! capture sources and the statistics engine:
//!
//! - [`FrameRecord`] represents one captured frame with zero-copy bytes
//! - [`WireTime`] is the capture-layer arrival timestamp
//! - [`LinkLayer`] maps datalink codes to fixed link-header lengths
//! - [`WindowSummary`] is the per-window statistical snapshot
//!
//! ## Usage Example
//!
//! ```rust
//! use netgauge::types::{FrameRecord, LinkLayer, WireTime};
//!
//! let bytes = vec![0u8; 60];
//! let frame = FrameRecord::new(bytes, WireTime::new(1_700_000_000, 250_000), 60, LinkLayer::Ethernet);
//!
//! assert!(frame.is_complete());
//! assert_eq!(frame.wire_length, 60);
//! ```

mod frame;
mod link;
mod summary;
mod wire_time;

pub use frame::FrameRecord;
pub use link::LinkLayer;
pub use summary::WindowSummary;
pub use wire_time::WireTime;

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_wire_time_span_is_whole_second_difference(
            first_secs in 0i64..1_000_000,
            span in 0i64..10_000,
            first_micros in 0u32..1_000_000,
            last_micros in 0u32..1_000_000,
        ) {
            let first = WireTime::new(first_secs, first_micros);
            let last = WireTime::new(first_secs + span, last_micros);

            // Sub-second parts never contribute to the whole-second span
            prop_assert_eq!(last.whole_secs_since(first), span as u64);
            prop_assert_eq!(first.whole_secs_since(last), 0u64);
        }

        #[test]
        fn prop_frame_completeness_matches_lengths(
            captured in 0usize..4096,
            wire_length in 0u32..65_535,
        ) {
            let frame = FrameRecord::new(
                vec![0u8; captured],
                WireTime::new(0, 0),
                wire_length,
                LinkLayer::Ethernet,
            );

            prop_assert_eq!(frame.is_complete(), captured >= wire_length as usize);
            prop_assert_eq!(frame.bytes.len(), captured);
        }

        #[test]
        fn prop_summary_serde_roundtrip(
            total_bytes in any::<u32>(),
            packet_count in 1u64..100_000,
            largest in 0u32..65_535,
            entropy in 0.0f64..8.0,
        ) {
            let summary = WindowSummary {
                total_bytes: total_bytes as u64,
                packet_count,
                avg_size: total_bytes as u64 / packet_count,
                bitrate_kbps: total_bytes as u64 / 1000,
                largest,
                smallest: largest.min(64),
                avg_entropy: entropy,
            };

            let yaml = serde_yaml_ng::to_string(&summary).expect("summary serializes");
            let back: WindowSummary = serde_yaml_ng::from_str(&yaml).expect("summary deserializes");
            prop_assert_eq!(back, summary);
        }
    }
}
