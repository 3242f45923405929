//! Per-window traffic summary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Statistical summary of one closed capture window.
///
/// Emitted once per window closure as an immutable snapshot; downstream
/// consumers use it to guess the traffic type (streaming, gaming, voice)
/// without inspecting payloads. All degenerate cases (empty window,
/// sub-second span) are reported as zero rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Sum of wire lengths over the window, in bytes
    pub total_bytes: u64,

    /// Number of frames observed in the window
    pub packet_count: u64,

    /// Mean frame size in bytes (integer-truncating), 0 for an empty window
    pub avg_size: u64,

    /// Mean transfer rate in kilobytes per second; 0 when first and last
    /// frame fall within the same whole second
    pub bitrate_kbps: u64,

    /// Largest frame seen in the window, in bytes
    pub largest: u32,

    /// Smallest frame seen in the window, in bytes
    pub smallest: u32,

    /// Mean per-frame Shannon entropy of payload bytes, 0.0..=8.0
    pub avg_entropy: f64,
}

impl fmt::Display for WindowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} B in {} packets (avg {} B, min {} B, max {} B), {} kB/s, entropy {:.3}",
            self.total_bytes,
            self.packet_count,
            self.avg_size,
            self.smallest,
            self.largest,
            self.bitrate_kbps,
            self.avg_entropy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_every_field() {
        let summary = WindowSummary {
            total_bytes: 600,
            packet_count: 3,
            avg_size: 200,
            bitrate_kbps: 0,
            largest: 300,
            smallest: 100,
            avg_entropy: 7.5,
        };

        let rendered = summary.to_string();
        assert!(rendered.contains("600 B"));
        assert!(rendered.contains("3 packets"));
        assert!(rendered.contains("avg 200 B"));
        assert!(rendered.contains("min 100 B"));
        assert!(rendered.contains("max 300 B"));
        assert!(rendered.contains("0 kB/s"));
        assert!(rendered.contains("entropy 7.500"));
    }
}
