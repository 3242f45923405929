//! Live capture source backed by libpcap

use std::time::Duration;

use pcap::{Active, Capture, Device};
use tracing::{debug, info, trace};

use crate::config::CaptureConfig;
use crate::source::FrameSource;
use crate::types::{FrameRecord, LinkLayer, WireTime};
use crate::{CaptureError, Result};

/// Delay between polls of an idle capture handle
const IDLE_WAIT: Duration = Duration::from_millis(10);

/// Idle polls between "still waiting" log lines (about one minute)
const IDLE_LOG_EVERY: u32 = 6_000;

/// Live source that reads from a network interface
///
/// The capture handle is opened in non-blocking mode and polled with
/// cooperative async sleeps, so a quiet interface never wedges the
/// runtime. Capturing usually requires CAP_NET_RAW or root.
pub struct LiveSource {
    capture: Capture<Active>,
    link: LinkLayer,
    device_name: String,
    filter: String,
}

impl LiveSource {
    /// Open a live capture according to `config`.
    ///
    /// Selects the configured interface (or the platform default), opens
    /// it with the configured snapshot length and promiscuous flag, and
    /// installs the BPF filter. When no filter is configured, the default
    /// UDP filter is scoped to the device's IPv4 address so only inbound
    /// traffic is measured.
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        let device = Self::select_device(config)?;
        let device_name = device.name.clone();
        let host_addr = device.addresses.iter().map(|a| a.addr).find(|addr| addr.is_ipv4());

        info!(device = %device_name, promiscuous = config.promiscuous, "opening live capture");

        let inactive = Capture::from_device(device).map_err(|e| {
            CaptureError::capture_failed_with_source(
                format!("failed to create capture on '{device_name}'"),
                e,
            )
        })?;

        let capture = inactive
            .snaplen(config.snaplen)
            .promisc(config.promiscuous)
            .immediate_mode(true)
            .open()
            .map_err(|e| {
                CaptureError::capture_failed_with_source(
                    format!("failed to activate capture on '{device_name}'"),
                    e,
                )
            })?;

        let mut capture = capture.setnonblock().map_err(|e| {
            CaptureError::capture_failed_with_source(
                format!("failed to switch '{device_name}' to non-blocking mode"),
                e,
            )
        })?;

        let filter = match (&config.filter, host_addr) {
            (Some(expression), _) => expression.clone(),
            (None, Some(addr)) => {
                format!("{} and dst host {}", CaptureConfig::DEFAULT_FILTER, addr)
            }
            (None, None) => CaptureConfig::DEFAULT_FILTER.to_string(),
        };
        capture.filter(&filter, true).map_err(|e| CaptureError::filter_error(filter.clone(), e))?;

        let link = LinkLayer::from_datalink(capture.get_datalink().0)?;

        info!(device = %device_name, %filter, ?link, "live capture ready");

        Ok(Self { capture, link, device_name, filter })
    }

    /// Name of the interface being captured.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// BPF filter installed on the capture handle.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn select_device(config: &CaptureConfig) -> Result<Device> {
        match &config.interface {
            Some(name) => {
                let devices = Device::list().map_err(|e| {
                    CaptureError::capture_failed_with_source("failed to list capture devices", e)
                })?;
                devices.into_iter().find(|d| &d.name == name).ok_or_else(|| {
                    CaptureError::capture_failed(format!("interface '{name}' not found"))
                })
            }
            None => Device::lookup()
                .map_err(|e| {
                    CaptureError::capture_failed_with_source("device lookup failed", e)
                })?
                .ok_or_else(|| CaptureError::capture_failed("no default capture device")),
        }
    }
}

#[async_trait::async_trait]
impl FrameSource for LiveSource {
    async fn next_frame(&mut self) -> Result<Option<FrameRecord>> {
        let mut idle_polls = 0u32;

        loop {
            match self.capture.next_packet() {
                Ok(packet) => {
                    let header = *packet.header;
                    let frame = FrameRecord::new(
                        packet.data.to_vec(),
                        WireTime::new(header.ts.tv_sec as i64, header.ts.tv_usec as u32),
                        header.len,
                        self.link,
                    );

                    trace!(
                        wire_length = frame.wire_length,
                        captured = frame.bytes.len(),
                        "captured frame"
                    );
                    return Ok(Some(frame));
                }
                Err(pcap::Error::TimeoutExpired) => {
                    // Nothing buffered; yield to the runtime and poll again
                    idle_polls += 1;
                    if idle_polls % IDLE_LOG_EVERY == 0 {
                        debug!(
                            device = %self.device_name,
                            "still waiting for traffic matching '{}'", self.filter
                        );
                    }
                    tokio::time::sleep(IDLE_WAIT).await;
                }
                Err(pcap::Error::NoMorePackets) => {
                    info!(device = %self.device_name, "capture handle reported end of stream");
                    return Ok(None);
                }
                Err(e) => {
                    return Err(CaptureError::capture_failed_with_source(
                        format!("read failed on '{}'", self.device_name),
                        e,
                    ));
                }
            }
        }
    }

    fn link_layer(&self) -> LinkLayer {
        self.link
    }

    fn describe(&self) -> String {
        format!("live:{}", self.device_name)
    }
}
