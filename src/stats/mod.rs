//! Windowed stream statistics engine.
//!
//! The engine turns an unbounded frame stream into a sequence of discrete
//! [`WindowSummary`](crate::types::WindowSummary) values: per-window size
//! statistics, a running average of per-frame payload entropy, and the
//! wall-clock-sampled policy that decides when a window closes.
//!
//! The two accumulators are independent concrete types composed inside
//! [`WindowTracker`]; nothing ever needs to treat them uniformly, so there
//! is no shared accumulator trait. Per-frame failures (unlocatable or
//! truncated payloads) are absorbed here; no input makes the engine
//! error or panic.

mod entropy;
mod payload;
mod size;
mod window;

pub use entropy::{EntropyAccumulator, shannon_entropy};
pub use payload::payload_range;
pub use size::SizeAccumulator;
pub use window::WindowTracker;
