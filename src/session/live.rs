//! Live capture session

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::{UnboundedReceiverStream, WatchStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::CaptureConfig;
use crate::driver::Driver;
use crate::source::FrameSource;
use crate::sources::LiveSource;
use crate::types::{FrameRecord, LinkLayer, WindowSummary};
use crate::Result;

/// Live capture session on a network interface
///
/// Owns the background reader task. Dropping the session cancels the
/// task, which closes the capture handle.
pub struct LiveSession {
    /// Frame watch receiver
    frames: watch::Receiver<Option<Arc<FrameRecord>>>,

    /// Summary receiver, taken by the first `summaries()` call
    summaries: Option<mpsc::UnboundedReceiver<Arc<WindowSummary>>>,

    /// Link layer of the captured interface
    link: LinkLayer,

    /// Source description for logging
    description: String,

    /// Cancellation token for stopping the reader task
    cancel: CancellationToken,
}

impl LiveSession {
    /// Open a live capture with default configuration.
    ///
    /// Default device, UDP-minus-DNS filter, one-second windows. Requires
    /// capture privileges (CAP_NET_RAW or root on most systems).
    pub async fn connect() -> Result<Self> {
        Self::connect_with(&CaptureConfig::default()).await
    }

    /// Open a live capture with an explicit configuration.
    pub async fn connect_with(config: &CaptureConfig) -> Result<Self> {
        let source = LiveSource::open(config)?;
        let link = source.link_layer();
        let description = source.describe();

        let channels = Driver::spawn(source, config.window());

        info!(source = %description, "live session started");

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
    /// Lossless and ordered; ends when the capture stops. The stream is
    /// independent of the session borrow, but there is only one: the
    /// summaries channel is single-consumer.
    ///
    /// # Panics
    ///
    /// Panics when called a second time on the same session.
    pub fn summaries(&mut self) -> impl Stream<Item = Arc<WindowSummary>> + 'static {
        let receiver = self.summaries.take().expect("summaries stream already taken");
        UnboundedReceiverStream::new(receiver)
    }

    /// Stream of captured frames, latest-wins.
    ///
    /// A monitoring tap: a slow consumer sees the most recent frame, not
    /// a backlog. Ends when the capture stops.
    pub fn frames(&self) -> impl Stream<Item = Arc<FrameRecord>> + 'static {
        WatchStream::new(self.frames.clone()).filter_map(|opt| async move { opt })
    }

    /// Link layer of the captured interface.
    pub fn link_layer(&self) -> LinkLayer {
        self.link
    }

    /// Description of the underlying source.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        debug!(source = %self.description, "dropping live session");
        self.cancel.cancel();
    }
}
