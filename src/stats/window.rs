//! Window coordination: routing, closure, and summary emission

use std::time::{Duration, Instant};

use tracing::debug;

use super::{EntropyAccumulator, SizeAccumulator};
use crate::types::{FrameRecord, WindowSummary};

/// Routes each captured frame to the statistics accumulators and closes
/// the window once enough wall-clock time has passed.
///
/// The boundary is sampled on frame arrival rather than driven by a
/// timer: a window runs slightly long when frames arrive sparsely, and an
/// idle capture emits nothing until the next frame shows up. Both
/// accumulators are owned exclusively by the tracker; the single-caller
/// contract of [`observe`](Self::observe) is the whole concurrency model.
#[derive(Debug)]
pub struct WindowTracker {
    size: SizeAccumulator,
    entropy: EntropyAccumulator,
    window: Duration,
    boundary: Instant,
}

impl WindowTracker {
    /// Window length matching the one-second reporting cadence.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Create a tracker with a custom window length.
    pub fn with_window(window: Duration) -> Self {
        Self {
            size: SizeAccumulator::new(),
            entropy: EntropyAccumulator::new(),
            window,
            boundary: Instant::now(),
        }
    }

    /// Fold one frame into the current window.
    ///
    /// The frame is always accumulated first; if the window has been open
    /// longer than its length, the boundary is re-stamped and the closed
    /// window's summary (including this frame) is returned with both
    /// accumulators reset for the next window.
    pub fn observe(&mut self, frame: &FrameRecord) -> Option<WindowSummary> {
        self.observe_at(frame, Instant::now())
    }

    fn observe_at(&mut self, frame: &FrameRecord, now: Instant) -> Option<WindowSummary> {
        self.size.accumulate(frame);
        self.entropy.accumulate(frame);

        if now.duration_since(self.boundary) > self.window {
            self.boundary = now;
            let summary = self.snapshot();
            self.size.reset();
            self.entropy.reset();
            debug!(%summary, "window closed");
            return Some(summary);
        }
        None
    }

    /// Close the current window early, if it holds any frames.
    ///
    /// Used at end of stream so a trailing partial window is not lost;
    /// idle trackers return `None`.
    pub fn flush(&mut self) -> Option<WindowSummary> {
        if self.size.packet_count() == 0 {
            return None;
        }

        self.boundary = Instant::now();
        let summary = self.snapshot();
        self.size.reset();
        self.entropy.reset();
        debug!(%summary, "window flushed at end of stream");
        Some(summary)
    }

    /// Configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    fn snapshot(&self) -> WindowSummary {
        WindowSummary {
            total_bytes: self.size.total_bytes(),
            packet_count: self.size.packet_count(),
            avg_size: self.size.avg_frame_size(),
            bitrate_kbps: self.size.bitrate_kbps(),
            largest: self.size.largest(),
            smallest: self.size.smallest().unwrap_or(0),
            avg_entropy: self.entropy.average_entropy(),
        }
    }
}

impl Default for WindowTracker {
    fn default() -> Self {
        Self::new()
    }
}
