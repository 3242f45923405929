//! Link-layer types and header sizes
//!
//! Maps libpcap datalink codes to the fixed per-frame header length that
//! precedes the network layer. Entropy payload location starts from this
//! offset, so only datalinks with a known fixed header are supported.

use serde::{Deserialize, Serialize};

use crate::{CaptureError, Result};

// DLT_* values from pcap/dlt.h
const DLT_NULL: i32 = 0;
const DLT_EN10MB: i32 = 1;
const DLT_RAW: i32 = 101;
const DLT_LINUX_SLL: i32 = 113;

/// Link layer of a capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkLayer {
    /// Ethernet II (14-byte header)
    Ethernet,

    /// BSD loopback encapsulation (4-byte family word)
    Null,

    /// Linux cooked capture, `any` pseudo-device (16-byte header)
    LinuxSll,

    /// Raw IP, no link-layer header
    RawIp,
}

impl LinkLayer {
    /// Map a libpcap datalink code to a supported link layer.
    pub fn from_datalink(code: i32) -> Result<Self> {
        match code {
            DLT_EN10MB => Ok(LinkLayer::Ethernet),
            DLT_NULL => Ok(LinkLayer::Null),
            DLT_LINUX_SLL => Ok(LinkLayer::LinuxSll),
            DLT_RAW => Ok(LinkLayer::RawIp),
            other => Err(CaptureError::UnsupportedLinkType { datalink: other }),
        }
    }

    /// Fixed link-layer header length in bytes.
    pub fn header_len(self) -> usize {
        match self {
            LinkLayer::Ethernet => 14,
            LinkLayer::Null => 4,
            LinkLayer::LinuxSll => 16,
            LinkLayer::RawIp => 0,
        }
    }
}
