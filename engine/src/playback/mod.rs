//! Trade-replay playback: a tick-driven cursor over an ordered candle
//! sequence, plus the tokio task that drives it in real time.

pub mod engine;
pub mod monitor;

pub use engine::{PlaybackEngine, PlaybackSpeed, PlaybackState};
