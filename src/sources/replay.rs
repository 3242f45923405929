//! Replay source for pcap savefiles

use std::path::{Path, PathBuf};
use std::time::Duration;

use pcap::{Capture, Offline};
use tracing::{debug, info, trace};

use crate::source::FrameSource;
use crate::types::{FrameRecord, LinkLayer, WireTime};
use crate::{CaptureError, Result};

/// Longest inter-frame gap honored during paced playback; recording gaps
/// beyond this are compressed so replay never stalls for hours
const MAX_GAP: Duration = Duration::from_secs(1);

/// Replay source that reads frames from a pcap savefile
///
/// Delivery is paced by the recorded timestamps so wall-clock windowing
/// over a replay approximates the original capture's cadence. A speed
/// multiplier compresses or stretches the pacing.
pub struct ReplaySource {
    capture: Capture<Offline>,
    link: LinkLayer,
    path: PathBuf,

    /// Playback speed multiplier (1.0 = recorded speed, 2.0 = double)
    speed: f64,

    /// Timestamp of the previously delivered frame, for pacing
    last_delivered: Option<WireTime>,

    delivered: u64,
}

impl ReplaySource {
    /// Open a savefile for replay at recorded speed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_speed(path, 1.0)
    }

    /// Open a savefile for replay with a speed multiplier.
    ///
    /// The multiplier is clamped to 0.1..=10.0.
    pub fn open_with_speed<P: AsRef<Path>>(path: P, speed: f64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let capture = Capture::from_file(&path).map_err(|e| {
            CaptureError::capture_failed_with_source(
                format!("failed to open savefile {}", path.display()),
                e,
            )
        })?;

        let link = LinkLayer::from_datalink(capture.get_datalink().0)?;
        let speed = speed.clamp(0.1, 10.0);

        info!(path = %path.display(), ?link, speed, "opened savefile for replay");

        Ok(Self { capture, link, path, speed, last_delivered: None, delivered: 0 })
    }

    /// Adjust playback speed, clamped to 0.1..=10.0.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 10.0);
        debug!(speed = self.speed, "playback speed set");
    }

    /// Current playback speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Number of frames delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Recorded gap between consecutive frames, for pacing.
    fn gap_from(&self, timestamp: WireTime) -> Duration {
        let Some(last) = self.last_delivered else {
            return Duration::ZERO;
        };

        let secs = timestamp.secs - last.secs;
        let micros = i64::from(timestamp.micros) - i64::from(last.micros);
        let total_micros = secs * 1_000_000 + micros;
        if total_micros <= 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(total_micros as u64).min(MAX_GAP)
    }
}

#[async_trait::async_trait]
impl FrameSource for ReplaySource {
    async fn next_frame(&mut self) -> Result<Option<FrameRecord>> {
        let (header, data) = match self.capture.next_packet() {
            Ok(packet) => (*packet.header, packet.data.to_vec()),
            Err(pcap::Error::NoMorePackets) => {
                debug!(delivered = self.delivered, "reached end of savefile");
                return Ok(None);
            }
            Err(e) => {
                return Err(CaptureError::capture_failed_with_source(
                    format!("read failed on savefile {}", self.path.display()),
                    e,
                ));
            }
        };

        let timestamp = WireTime::new(header.ts.tv_sec as i64, header.ts.tv_usec as u32);

        let gap = self.gap_from(timestamp);
        if !gap.is_zero() {
            tokio::time::sleep(gap.div_f64(self.speed)).await;
        }

        self.last_delivered = Some(timestamp);
        self.delivered += 1;

        trace!(
            frame = self.delivered,
            wire_length = header.len,
            "replaying frame"
        );

        Ok(Some(FrameRecord::new(data, timestamp, header.len, self.link)))
    }

    fn link_layer(&self) -> LinkLayer {
        self.link
    }

    fn describe(&self) -> String {
        format!("replay:{}", self.path.display())
    }
}
