//! Captured frame record for the stream-based architecture

use std::sync::Arc;

use super::{LinkLayer, WireTime};

/// One captured frame as delivered by a [`FrameSource`](crate::FrameSource).
///
/// This is the fundamental data unit that flows through the system. The
/// byte buffer is shared zero-copy via `Arc`; statistics accumulators read
/// through a borrow for the duration of one call and retain nothing.
///
/// `wire_length` is the frame's length on the wire, which can exceed
/// `bytes.len()` when the capture was truncated by the snapshot length.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    /// Raw frame bytes as captured (zero-copy via Arc)
    pub bytes: Arc<[u8]>,

    /// Arrival timestamp from the capture layer
    pub timestamp: WireTime,

    /// Total frame length on the wire, headers included
    pub wire_length: u32,

    /// Link layer of the source that captured this frame
    pub link: LinkLayer,
}

impl FrameRecord {
    /// Create a new frame record.
    pub fn new(bytes: Vec<u8>, timestamp: WireTime, wire_length: u32, link: LinkLayer) -> Self {
        Self { bytes: bytes.into(), timestamp, wire_length, link }
    }

    /// Whether the capture covers the full wire length.
    pub fn is_complete(&self) -> bool {
        self.bytes.len() >= self.wire_length as usize
    }
}
