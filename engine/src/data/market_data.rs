// In-memory candle storage backing the market-data stream and the replay
// playback engine's candle supply.
use anyhow::Result;
use shared::models::{Candle, TimeFrame};
use std::collections::HashMap;

pub struct MarketDataStore {
    // Candles per symbol and timeframe, kept sorted ascending by timestamp.
    data: HashMap<String, HashMap<TimeFrame, Vec<Candle>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
        }
    }

    pub fn add_candles(
        &mut self,
        symbol: &str,
        timeframe: TimeFrame,
        new_candles: Vec<Candle>,
    ) -> Result<()> {
        let symbol_data = self.data.entry(symbol.to_string()).or_default();
        let timeframe_data = symbol_data.entry(timeframe).or_default();

        timeframe_data.extend(new_candles);
        timeframe_data.sort_by_key(|c| c.timestamp);
        timeframe_data.dedup_by_key(|c| c.timestamp);

        Ok(())
    }

    pub fn get_candles(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        from_timestamp: Option<chrono::DateTime<chrono::Utc>>,
        to_timestamp: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Option<Vec<Candle>> {
        self.data
            .get(symbol)
            .and_then(|symbol_data| symbol_data.get(&timeframe))
            .map(|candles| {
                candles
                    .iter()
                    .filter(|c| from_timestamp.map_or(true, |start| c.timestamp >= start))
                    .filter(|c| to_timestamp.map_or(true, |end| c.timestamp <= end))
                    .cloned()
                    .collect()
            })
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}
