//! Replay playback engine.
//!
//! Owns a time-ordered candle sequence and a fractional cursor into it,
//! advances the cursor over wall-clock time at an adjustable speed, and
//! pushes a state snapshot to a single subscriber on every change.
//!
//! Every operation is total: out-of-range input is clamped or ignored,
//! never rejected. The engine is synchronous and tick-driven; see
//! `playback::monitor` for the task that feeds it real time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Candle;
use std::time::{Duration, Instant};

/// Replay speed multiplier. Each variant maps to a fixed per-candle
/// duration, so e.g. `Fast10` consumes one candle per 100ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackSpeed {
    Half,
    Normal,
    Double,
    Fast5,
    Fast10,
}

impl PlaybackSpeed {
    pub fn millis_per_candle(&self) -> u64 {
        match self {
            PlaybackSpeed::Half => 2000,
            PlaybackSpeed::Normal => 1000,
            PlaybackSpeed::Double => 500,
            PlaybackSpeed::Fast5 => 200,
            PlaybackSpeed::Fast10 => 100,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Fast5 => 5.0,
            PlaybackSpeed::Fast10 => 10.0,
        }
    }

    /// Maps a UI speed multiplier onto the closed set of speeds.
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        match multiplier {
            m if m == 0.5 => Some(PlaybackSpeed::Half),
            m if m == 1.0 => Some(PlaybackSpeed::Normal),
            m if m == 2.0 => Some(PlaybackSpeed::Double),
            m if m == 5.0 => Some(PlaybackSpeed::Fast5),
            m if m == 10.0 => Some(PlaybackSpeed::Fast10),
            _ => None,
        }
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        PlaybackSpeed::Normal
    }
}

/// Snapshot pushed to the subscriber on every cursor change.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Fractional between ticks; consumers index candles with its floor.
    pub current_candle_index: f64,
    pub speed: PlaybackSpeed,
    pub total_candles: usize,
    pub current_candle: Option<Candle>,
    /// Cursor normalized to [0, 1]; 0 for sequences of length <= 1.
    pub progress: f64,
}

pub type StateCallback = Box<dyn FnMut(PlaybackState) + Send + Sync>;

pub struct PlaybackEngine {
    candles: Vec<Candle>,
    cursor: f64,
    playing: bool,
    speed: PlaybackSpeed,
    callback: Option<StateCallback>,
    last_tick: Option<Instant>,
}

impl PlaybackEngine {
    pub fn new() -> Self {
        PlaybackEngine {
            candles: Vec::new(),
            cursor: 0.0,
            playing: false,
            speed: PlaybackSpeed::default(),
            callback: None,
            last_tick: None,
        }
    }

    /// Replaces the candle sequence, resets the cursor to 0 and stops
    /// playback. An empty sequence is valid and yields no current candle.
    pub fn set_candles(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
        self.cursor = 0.0;
        self.playing = false;
        self.last_tick = None;
        self.notify();
    }

    /// Registers the single state-change subscriber, replacing any
    /// previously registered one.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(PlaybackState) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Starts playback. No-op when already playing or when the sequence
    /// is empty.
    pub fn play(&mut self) {
        if self.playing || self.candles.is_empty() {
            return;
        }
        self.playing = true;
        self.last_tick = None;
        self.notify();
    }

    /// Halts advancement; the cursor keeps its current position.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.last_tick = None;
        self.notify();
    }

    /// Halts advancement and resets the cursor to 0, notifying once.
    pub fn stop(&mut self) {
        self.playing = false;
        self.last_tick = None;
        self.cursor = 0.0;
        self.notify();
    }

    /// Same as `stop`; usable from any state and always notifies.
    pub fn reset(&mut self) {
        self.stop();
    }

    /// Jumps the cursor to `index`, clamped into bounds. Play/pause state
    /// is unchanged; no-op on an empty sequence.
    pub fn seek(&mut self, index: i64) {
        if self.candles.is_empty() {
            return;
        }
        let last = (self.candles.len() - 1) as i64;
        self.cursor = index.clamp(0, last) as f64;
        self.notify();
    }

    /// Seeks to the first candle at or after `timestamp`; no-op when no
    /// candle qualifies.
    pub fn seek_to_time(&mut self, timestamp: DateTime<Utc>) {
        let found = self
            .candles
            .iter()
            .position(|c| c.timestamp >= timestamp);
        if let Some(index) = found {
            self.seek(index as i64);
        }
    }

    /// Steps the display index forward by one, clamped; no-op at the end.
    pub fn next_candle(&mut self) {
        if self.candles.is_empty() {
            return;
        }
        let index = self.display_index();
        if index + 1 < self.candles.len() {
            self.cursor = (index + 1) as f64;
            self.notify();
        }
    }

    /// Steps the display index back by one, clamped; no-op at the start.
    pub fn previous_candle(&mut self) {
        if self.candles.is_empty() {
            return;
        }
        let index = self.display_index();
        if index > 0 {
            self.cursor = (index - 1) as f64;
            self.notify();
        }
    }

    /// Takes effect on the next tick; does not itself notify.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances the cursor by the wall-clock time elapsed since the
    /// previous tick, converted through the per-speed candle duration.
    /// When the display index reaches the last candle the cursor clamps
    /// there, playback auto-pauses and a final snapshot is emitted.
    pub fn tick(&mut self, now: Instant) {
        if !self.playing || self.candles.is_empty() {
            return;
        }
        let elapsed = self
            .last_tick
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);

        self.cursor += elapsed.as_secs_f64() * 1000.0 / self.speed.millis_per_candle() as f64;

        let last = self.candles.len() - 1;
        if self.cursor.floor() as usize >= last {
            self.cursor = last as f64;
            self.playing = false;
            self.last_tick = None;
        }
        self.notify();
    }

    /// Synchronous snapshot of the current engine state.
    pub fn state(&self) -> PlaybackState {
        let total = self.candles.len();
        let progress = if total > 1 {
            (self.cursor / (total - 1) as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };
        PlaybackState {
            is_playing: self.playing,
            current_candle_index: self.cursor,
            speed: self.speed,
            total_candles: total,
            current_candle: self.candles.get(self.display_index()).cloned(),
            progress,
        }
    }

    // The one truncation rule for integer consumers of the fractional
    // cursor: floor, clamped to the last index.
    fn display_index(&self) -> usize {
        if self.candles.is_empty() {
            return 0;
        }
        (self.cursor.floor() as usize).min(self.candles.len() - 1)
    }

    fn notify(&mut self) {
        let state = self.state();
        if let Some(callback) = self.callback.as_mut() {
            callback(state);
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}
