//! Synthetic frame builders shared by unit tests, integration tests, and
//! benches.
//!
//! Real captures need privileges and a live interface, so tests drive the
//! engine with hand-built Ethernet/IPv4/UDP frames instead. Header fields
//! that the engine never reads (addresses, checksums) are left zeroed.

#![cfg(any(test, feature = "benchmark"))]

use crate::types::{FrameRecord, LinkLayer, WireTime};

/// Ethernet (14) + minimal IPv4 (20) + UDP (8)
pub const UDP_HEADER_OVERHEAD: usize = 42;

/// Build a complete Ethernet/IPv4/UDP frame around `payload`.
///
/// The IPv4 header is minimal (IHL = 5, no options) and the timestamp is
/// `ts_secs` whole seconds.
pub fn udp_frame(payload: &[u8], ts_secs: i64) -> FrameRecord {
    udp_frame_at(payload, ts_secs, 0)
}

/// Build a complete Ethernet/IPv4/UDP frame with a sub-second timestamp.
pub fn udp_frame_at(payload: &[u8], ts_secs: i64, ts_micros: u32) -> FrameRecord {
    let mut bytes = Vec::with_capacity(UDP_HEADER_OVERHEAD + payload.len());

    // Ethernet II: zeroed addresses, EtherType IPv4
    bytes.extend_from_slice(&[0u8; 12]);
    bytes.extend_from_slice(&[0x08, 0x00]);

    // IPv4: version 4, IHL 5, protocol UDP
    let ip_total_len = (20 + 8 + payload.len()) as u16;
    bytes.push(0x45);
    bytes.push(0x00);
    bytes.extend_from_slice(&ip_total_len.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x00, 0x40, 0x00]); // id, DF
    bytes.push(64); // TTL
    bytes.push(17); // UDP
    bytes.extend_from_slice(&[0x00, 0x00]); // checksum (unread)
    bytes.extend_from_slice(&[10, 0, 0, 1]);
    bytes.extend_from_slice(&[10, 0, 0, 2]);

    // UDP: ports, length, checksum
    let udp_len = (8 + payload.len()) as u16;
    bytes.extend_from_slice(&40_000u16.to_be_bytes());
    bytes.extend_from_slice(&9_999u16.to_be_bytes());
    bytes.extend_from_slice(&udp_len.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x00]);

    bytes.extend_from_slice(payload);

    let wire_length = bytes.len() as u32;
    FrameRecord::new(bytes, WireTime::new(ts_secs, ts_micros), wire_length, LinkLayer::Ethernet)
}

/// Build a UDP frame whose capture was cut at `caplen` bytes while the
/// wire length still reflects the full frame.
pub fn truncated_udp_frame(payload: &[u8], caplen: usize) -> FrameRecord {
    let full = udp_frame(payload, 0);
    let cut = caplen.min(full.bytes.len());
    FrameRecord::new(full.bytes[..cut].to_vec(), full.timestamp, full.wire_length, full.link)
}

/// Build a frame of exactly `wire_length` zeroed bytes.
///
/// Size statistics only read the wire length; the zeroed body keeps the
/// entropy path harmless (payload of zeros, entropy 0).
pub fn sized_frame(wire_length: u32) -> FrameRecord {
    sized_frame_at(wire_length, 0, 0)
}

/// Build a zeroed frame with an explicit timestamp.
pub fn sized_frame_at(wire_length: u32, ts_secs: i64, ts_micros: u32) -> FrameRecord {
    FrameRecord::new(
        vec![0u8; wire_length as usize],
        WireTime::new(ts_secs, ts_micros),
        wire_length,
        LinkLayer::Ethernet,
    )
}
