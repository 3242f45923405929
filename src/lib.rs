//! Windowed traffic statistics for live packet capture.
//!
//! Netgauge ingests a live sequence of network frames and produces, once
//! per one-second window, a compact statistical summary of the traffic it
//! observed: byte volume, packet count, size extremes, average size,
//! bitrate, and average payload randomness (Shannon entropy). The
//! summaries are a lightweight traffic-classification aid: encrypted
//! video, voice chat, and game traffic have visibly different size and
//! entropy profiles, and none of it requires deep packet inspection.
//!
//! # Features
//!
//! - **Live capture**: libpcap-backed capture with BPF filtering
//! - **Savefile replay**: the same pipeline over recorded pcap files
//! - **Streaming API**: summaries and frames as async streams
//! - **Robust engine**: malformed frames are skipped, never fatal
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use netgauge::Netgauge;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Netgauge::open("traffic.pcap").await?;
//!     let mut summaries = session.summaries();
//!
//!     while let Some(summary) = summaries.next().await {
//!         println!("{summary}");
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod config;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Statistics engine
pub mod stats;

// Stream-based capture architecture
pub mod driver;
pub mod session;
pub mod source;
pub mod sources;

// Core exports
pub use config::CaptureConfig;
pub use error::*;
pub use types::*;

// Engine exports
pub use stats::{EntropyAccumulator, SizeAccumulator, WindowTracker, shannon_entropy};

// Capture exports
pub use session::{LiveSession, ReplaySession};
pub use source::FrameSource;
pub use sources::{LiveSource, ReplaySource};

/// Unified entry point for capture sessions.
///
/// This factory provides a consistent API for opening live captures and
/// pcap savefile replays.
///
/// # Examples
///
/// ## Live capture (requires privileges)
/// ```rust,no_run
/// use netgauge::Netgauge;
///
/// #[tokio::main]
/// async fn main() -> netgauge::Result<()> {
///     let session = Netgauge::capture().await?;
///     # drop(session);
///     Ok(())
/// }
/// ```
///
/// ## Savefile replay
/// ```rust,no_run
/// use netgauge::Netgauge;
///
/// #[tokio::main]
/// async fn main() -> netgauge::Result<()> {
///     let session = Netgauge::open("session.pcap").await?;
///     # drop(session);
///     Ok(())
/// }
/// ```
pub struct Netgauge;

impl Netgauge {
    /// Open a live capture on the default device with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no capture device is available, the handle
    /// cannot be activated (usually missing privileges), or the filter
    /// fails to install.
    pub async fn capture() -> Result<LiveSession> {
        LiveSession::connect().await
    }

    /// Open a live capture with an explicit configuration.
    pub async fn capture_with(config: &CaptureConfig) -> Result<LiveSession> {
        LiveSession::connect_with(config).await
    }

    /// Open a pcap savefile for replay.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not a valid
    /// savefile, or records an unsupported link layer.
    pub async fn open<P: AsRef<std::path::Path>>(path: P) -> Result<ReplaySession> {
        ReplaySession::open(path).await
    }
}
