//! Replay session for pcap savefiles

use std::path::Path;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::{UnboundedReceiverStream, WatchStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::driver::Driver;
use crate::source::FrameSource;
use crate::sources::ReplaySource;
use crate::stats::WindowTracker;
use crate::types::{FrameRecord, LinkLayer, WindowSummary};
use crate::Result;

/// Replay session over a pcap savefile
///
/// Behaves like a live session fed from the recording: frames are paced
/// by the recorded timestamps and summarized with the same one-second
/// windows. The trailing partial window is flushed when the file ends, so
/// short captures still produce a summary.
pub struct ReplaySession {
    frames: watch::Receiver<Option<Arc<FrameRecord>>>,
    summaries: Option<mpsc::UnboundedReceiver<Arc<WindowSummary>>>,
    link: LinkLayer,
    description: String,
    cancel: CancellationToken,
}

impl ReplaySession {
    /// Open a savefile for replay at recorded speed.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_speed(path, 1.0).await
    }

    /// Open a savefile for replay with a speed multiplier (0.1..=10.0).
    pub async fn open_with_speed<P: AsRef<Path>>(path: P, speed: f64) -> Result<Self> {
        let source = ReplaySource::open_with_speed(path, speed)?;
        let link = source.link_layer();
        let description = source.describe();

        let channels = Driver::spawn(source, WindowTracker::DEFAULT_WINDOW);

        info!(source = %description, speed, "replay session started");

        Ok(Self {
            frames: channels.frames,
            summaries: Some(channels.summaries),
            link,
            description,
            cancel: channels.cancel,
        })
    }

    /// Stream of per-window summaries.
    ///
    /// Lossless and ordered; ends after the final (possibly partial)
    /// window once the file is exhausted.
    ///
    /// # Panics
    ///
    /// Panics when called a second time on the same session.
    pub fn summaries(&mut self) -> impl Stream<Item = Arc<WindowSummary>> + 'static {
        let receiver = self.summaries.take().expect("summaries stream already taken");
        UnboundedReceiverStream::new(receiver)
    }

    /// Stream of replayed frames, latest-wins.
    pub fn frames(&self) -> impl Stream<Item = Arc<FrameRecord>> + 'static {
        WatchStream::new(self.frames.clone()).filter_map(|opt| async move { opt })
    }

    /// Link layer recorded in the savefile.
    pub fn link_layer(&self) -> LinkLayer {
        self.link
    }

    /// Description of the underlying source.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Drop for ReplaySession {
    fn drop(&mut self) {
        debug!(source = %self.description, "dropping replay session");
        self.cancel.cancel();
    }
}
