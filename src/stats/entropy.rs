//! Payload entropy statistics for one capture window
//!
//! Shannon entropy over the payload byte-value distribution measures the
//! inherent randomness of a frame's data content on a 0–8 scale for 8-bit
//! data. Encrypted or compressed media trends toward 8; sparse
//! game-state updates sit much lower, which is what makes the per-window
//! average useful for rough traffic classification.

use tracing::trace;

use super::payload::payload_range;
use crate::types::FrameRecord;

/// Accumulates a running average of per-frame payload entropy.
///
/// The average is updated online: no per-frame history is retained, and
/// the result equals the arithmetic mean of all folded entropies exactly
/// (up to floating-point rounding).
#[derive(Debug, Default)]
pub struct EntropyAccumulator {
    sample_count: u64,
    avg_entropy: f64,
}

impl EntropyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute one frame's payload entropy and fold it into the average.
    ///
    /// Frames without a locatable payload (declared headers meet or exceed
    /// the wire length, or the capture is truncated) are skipped entirely:
    /// the sample count and average stay untouched.
    pub fn accumulate(&mut self, frame: &FrameRecord) {
        let Some(range) = payload_range(frame) else {
            trace!(wire_length = frame.wire_length, "no locatable payload, skipping entropy");
            return;
        };

        let entropy = shannon_entropy(&frame.bytes[range]);
        let samples = self.sample_count as f64;
        self.avg_entropy = (self.avg_entropy * samples + entropy) / (samples + 1.0);
        self.sample_count += 1;
    }

    /// Mean per-frame entropy since the last reset, 0.0 when no frame
    /// contributed.
    pub fn average_entropy(&self) -> f64 {
        self.avg_entropy
    }

    /// Number of frames that contributed to the average.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Clear the running average back to the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shannon entropy of a byte sequence, in bits per byte (0.0..=8.0).
///
/// `H = -Σ pᵢ·log2(pᵢ)` over byte values with nonzero frequency, computed
/// as `Σ (fᵢ/n)·(log2(n) − log2(fᵢ))` to factor the length division out
/// of the log. An empty slice has entropy 0.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut freq = [0u32; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    let log_len = len.log2();

    let mut entropy = 0.0;
    for &count in freq.iter() {
        if count == 0 {
            continue;
        }
        entropy += (f64::from(count) / len) * (log_len - f64::from(count).log2());
    }
    entropy
}
