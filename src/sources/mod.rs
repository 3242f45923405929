//! Capture source implementations
//!
//! Two backends implement [`FrameSource`](crate::FrameSource): live
//! interface capture and pcap savefile replay. Both go through the same
//! driver and windowing pipeline.

pub mod live;
pub mod replay;

pub use live::LiveSource;
pub use replay::ReplaySource;
