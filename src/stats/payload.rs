//! Transport payload location within a captured frame
//!
//! Walks the protocol headers in front of the payload: the fixed
//! link-layer header, an IPv4 header whose length comes from the IHL
//! nibble (4-byte units), and the fixed 8-byte UDP header. Every read is
//! bounds-checked against the captured bytes, so malformed or truncated
//! frames come back as `None` instead of an out-of-range slice.

use std::ops::Range;

use crate::types::FrameRecord;

/// UDP header length in bytes
const UDP_HEADER_LEN: usize = 8;

/// IHL field unit (4-byte words)
const IHL_UNIT: usize = 4;

/// Locate the transport payload range within `frame.bytes`.
///
/// Returns `None` when the declared headers meet or exceed the wire
/// length (no payload), or when the snapshot length truncated the capture
/// below the payload end. Both cases are per-frame conditions a caller is
/// expected to skip, not errors.
pub fn payload_range(frame: &FrameRecord) -> Option<Range<usize>> {
    let bytes = frame.bytes.as_ref();
    let wire_len = frame.wire_length as usize;

    // First network-layer byte carries the version/IHL nibbles
    let link_len = frame.link.header_len();
    let version_ihl = *bytes.get(link_len)?;
    let ip_header_len = (version_ihl & 0x0F) as usize * IHL_UNIT;

    let offset = link_len.checked_add(ip_header_len)?.checked_add(UDP_HEADER_LEN)?;
    if offset >= wire_len {
        return None;
    }
    if bytes.len() < wire_len {
        return None;
    }

    Some(offset..wire_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::udp_frame;
    use crate::types::{FrameRecord, LinkLayer, WireTime};

    #[test]
    fn locates_payload_behind_minimal_headers() {
        // 14-byte Ethernet + 20-byte IPv4 + 8-byte UDP
        let frame = udp_frame(&[0xAA; 100], 0);
        let range = payload_range(&frame).expect("payload should be located");
        assert_eq!(range, 42..142);
        assert_eq!(&frame.bytes[range], &[0xAA; 100][..]);
    }

    #[test]
    fn honors_the_ihl_nibble() {
        // IPv4 header with options: IHL = 7 words = 28 bytes
        let mut bytes = vec![0u8; 14 + 28 + 8 + 10];
        bytes[14] = 0x47;
        let wire_length = bytes.len() as u32;
        let frame = FrameRecord::new(bytes, WireTime::new(0, 0), wire_length, LinkLayer::Ethernet);

        let range = payload_range(&frame).expect("payload should be located");
        assert_eq!(range, 50..60);
    }

    #[test]
    fn headers_only_frame_has_no_payload() {
        let frame = udp_frame(&[], 0);
        assert_eq!(payload_range(&frame), None);
    }

    #[test]
    fn declared_headers_beyond_wire_length_are_rejected() {
        // IHL claims 60 bytes of IPv4 header but the frame is 50 bytes total
        let mut bytes = vec![0u8; 50];
        bytes[14] = 0x4F;
        let frame = FrameRecord::new(bytes, WireTime::new(0, 0), 50, LinkLayer::Ethernet);
        assert_eq!(payload_range(&frame), None);
    }

    #[test]
    fn snaplen_truncated_capture_is_rejected() {
        let full = udp_frame(&[0x55; 400], 0);
        let truncated = FrameRecord::new(
            full.bytes[..64].to_vec(),
            full.timestamp,
            full.wire_length,
            full.link,
        );
        assert_eq!(payload_range(&truncated), None);
    }

    #[test]
    fn empty_capture_is_rejected() {
        let frame = FrameRecord::new(Vec::new(), WireTime::new(0, 0), 0, LinkLayer::Ethernet);
        assert_eq!(payload_range(&frame), None);
    }
}
