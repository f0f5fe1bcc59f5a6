//! Background drive task for playback

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use super::engine::PlaybackEngine;

/// Default frame interval, roughly one display refresh.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Spawn the drive task for an engine that has just been told to play.
pub fn spawn_playback_drive(
    engine: Arc<RwLock<PlaybackEngine>>,
    tick_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(drive_playback(engine, tick_interval))
}

/// Ticks the engine once per frame interval while it is playing and
/// returns as soon as it is not, so no tick runs after pause/stop and
/// nothing stays scheduled once playback ends.
pub async fn drive_playback(engine: Arc<RwLock<PlaybackEngine>>, tick_interval: Duration) {
    let mut interval = time::interval(tick_interval);
    debug!(
        interval_ms = tick_interval.as_millis() as u64,
        "Playback drive task started"
    );

    loop {
        interval.tick().await;

        let mut engine_write = engine.write().await;
        if !engine_write.is_playing() {
            break;
        }
        engine_write.tick(Instant::now());
        // tick() auto-pauses at the end of the sequence
        if !engine_write.is_playing() {
            break;
        }
    }

    debug!("Playback drive task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::engine::PlaybackSpeed;
    use chrono::{TimeZone, Utc};
    use shared::models::Candle;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                symbol: "BTCUSDT".to_string(),
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 0.0,
                trades: 0,
            })
            .collect()
    }

    #[tokio::test]
    async fn drive_runs_to_end_and_exits() {
        let engine = Arc::new(RwLock::new(PlaybackEngine::new()));
        {
            let mut engine_write = engine.write().await;
            engine_write.set_candles(candles(3));
            engine_write.set_speed(PlaybackSpeed::Fast10); // 100ms per candle
            engine_write.play();
        }

        let handle = spawn_playback_drive(engine.clone(), Duration::from_millis(10));
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("drive task should finish once playback ends")
            .unwrap();

        let state = engine.read().await.state();
        assert!(!state.is_playing);
        assert_eq!(state.current_candle_index, 2.0);
    }

    #[tokio::test]
    async fn drive_exits_after_pause_and_cursor_freezes() {
        let engine = Arc::new(RwLock::new(PlaybackEngine::new()));
        {
            let mut engine_write = engine.write().await;
            engine_write.set_candles(candles(100));
            engine_write.set_speed(PlaybackSpeed::Fast10);
            engine_write.play();
        }

        let handle = spawn_playback_drive(engine.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(50)).await;
        engine.write().await.pause();

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("drive task should exit after pause")
            .unwrap();

        let frozen = engine.read().await.state().current_candle_index;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(engine.read().await.state().current_candle_index, frozen);
    }
}
