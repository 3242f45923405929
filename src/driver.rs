//! Driver spawns and manages the capture processing task

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::source::FrameSource;
use crate::stats::WindowTracker;
use crate::types::{FrameRecord, WindowSummary};

/// Result of spawning driver tasks
pub struct DriverChannels {
    /// Receiver for captured frames; latest-wins, `None` marks end of stream
    pub frames: watch::Receiver<Option<Arc<FrameRecord>>>,

    /// Receiver for per-window summaries; lossless and ordered, closes at
    /// end of stream
    pub summaries: mpsc::UnboundedReceiver<Arc<WindowSummary>>,

    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the capture processing task
///
/// Spawns a reader task that owns the [`FrameSource`] and the
/// [`WindowTracker`], so the whole engine runs on the single call path
/// the source delivers frames on. Summaries go over an unbounded channel:
/// they arrive about once per window and every one must be delivered, in
/// the order windows close. Frames go over a watch channel where
/// latest-wins is the right fit for monitoring taps.
pub struct Driver;

impl Driver {
    /// Give up after this many consecutive source errors
    const MAX_ERRORS: u32 = 10;

    /// Spawn the reader task for the given source.
    ///
    /// Returns the frame and summary receivers, plus a cancellation token
    /// for graceful shutdown.
    pub fn spawn<S>(source: S, window: Duration) -> DriverChannels
    where
        S: FrameSource,
    {
        let (frame_tx, frame_rx) = watch::channel(None);
        let (summary_tx, summary_rx) = mpsc::unbounded_channel();

        let cancel = CancellationToken::new();
        let cancel_reader = cancel.clone();

        tokio::spawn(async move {
            Self::reader_task(source, window, frame_tx, summary_tx, cancel_reader).await;
        });

        DriverChannels { frames: frame_rx, summaries: summary_rx, cancel }
    }

    /// Reader task - pulls frames from the source and drives windowing
    async fn reader_task<S>(
        mut source: S,
        window: Duration,
        frame_tx: watch::Sender<Option<Arc<FrameRecord>>>,
        summary_tx: mpsc::UnboundedSender<Arc<WindowSummary>>,
        cancel: CancellationToken,
    ) where
        S: FrameSource,
    {
        info!(source = %source.describe(), "reader task started");

        let mut tracker = WindowTracker::with_window(window);
        let mut frame_count = 0u64;
        let mut summary_count = 0u64;
        let mut error_count = 0u32;

        loop {
            if cancel.is_cancelled() {
                info!("reader cancelled");
                break;
            }

            // Allow cancellation while blocked on the source
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("reader cancelled during read");
                    break;
                }
                result = source.next_frame() => result,
            };

            match result {
                Ok(Some(frame)) => {
                    frame_count += 1;
                    error_count = 0;

                    trace!(frame = frame_count, wire_length = frame.wire_length, "frame received");

                    if let Some(summary) = tracker.observe(&frame) {
                        summary_count += 1;
                        debug!(window = summary_count, %summary, "emitting summary");
                        if summary_tx.send(Arc::new(summary)).is_err() {
                            debug!("summary receiver dropped, shutting down");
                            break;
                        }
                    }

                    if frame_tx.send(Some(Arc::new(frame))).is_err() && summary_tx.is_closed() {
                        debug!("all receivers dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!(frames = frame_count, "source stream ended");

                    // Don't lose the trailing partial window of a replay
                    if let Some(summary) = tracker.flush() {
                        summary_count += 1;
                        debug!(window = summary_count, %summary, "emitting final summary");
                        let _ = summary_tx.send(Arc::new(summary));
                    }

                    let _ = frame_tx.send(None);
                    break;
                }
                Err(e) => {
                    // Source error - don't crash on transient failures
                    error_count += 1;
                    error!("source error ({}/{}): {}", error_count, Self::MAX_ERRORS, e);

                    if error_count >= Self::MAX_ERRORS {
                        error!("too many source errors, shutting down");
                        let _ = frame_tx.send(None);
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        info!(frames = frame_count, summaries = summary_count, "reader task ended");
        // Dropping summary_tx closes the summary stream
    }
}
