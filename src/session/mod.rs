//! Capture sessions
//!
//! A session pairs a [`FrameSource`](crate::FrameSource) with the driver
//! task and exposes the results as streams: `summaries()` for the
//! per-window statistics and `frames()` as a latest-wins monitoring tap.
//! Sessions cancel their reader task on drop.

pub mod live;
pub mod replay;

pub use live::LiveSession;
pub use replay::ReplaySession;
