//! Frame source trait for capture backends

use crate::Result;
use crate::types::{FrameRecord, LinkLayer};

/// Trait for captured-frame sources
///
/// Sources abstract over where frames come from (live interface, savefile
/// replay) and handle their own timing internally. Frames are delivered
/// one at a time, in arrival order, on the single call path that also
/// drives windowing.
#[async_trait::async_trait]
pub trait FrameSource: Send + 'static {
    /// Get the next captured frame
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - New frame available
    /// - `Ok(None)` - Stream ended (normal termination; live captures
    ///   only end via cancellation)
    /// - `Err(e)` - Error occurred
    ///
    /// Each source handles timing internally:
    /// - Live: polls the capture handle with cooperative async waits
    /// - Replay: paces delivery by recorded timestamps
    async fn next_frame(&mut self) -> Result<Option<FrameRecord>>;

    /// Link layer of the frames this source yields
    ///
    /// Fixed per source; it determines where the network layer starts
    /// when locating payloads.
    fn link_layer(&self) -> LinkLayer;

    /// Human-readable description of the source (interface or file name)
    fn describe(&self) -> String;
}
