use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub trades: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour1,
    Day1,
}

impl TimeFrame {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Minute1 => "1m",
            TimeFrame::Minute5 => "5m",
            TimeFrame::Minute15 => "15m",
            TimeFrame::Minute30 => "30m",
            TimeFrame::Hour1 => "1h",
            TimeFrame::Day1 => "1d",
        }
    }
}

impl FromStr for TimeFrame {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(TimeFrame::Minute1),
            "5m" => Ok(TimeFrame::Minute5),
            "15m" => Ok(TimeFrame::Minute15),
            "30m" => Ok(TimeFrame::Minute30),
            "1h" => Ok(TimeFrame::Hour1),
            "1d" => Ok(TimeFrame::Day1),
            other => Err(anyhow::anyhow!("Unknown timeframe '{}'", other)),
        }
    }
}

/// Direction of a journal trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// +1.0 for longs, -1.0 for shorts; multiplies the raw price move
    /// when computing realized PnL.
    pub fn sign(&self) -> f64 {
        match self {
            TradeSide::Long => 1.0,
            TradeSide::Short => -1.0,
        }
    }
}

impl FromStr for TradeSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(TradeSide::Long),
            "short" | "sell" => Ok(TradeSide::Short),
            other => Err(anyhow::anyhow!("Unknown trade side '{}'", other)),
        }
    }
}

/// One journal entry: a position opened (and usually closed) on a symbol.
/// `exit_time`/`exit_price`/`pnl` are unset while the position is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub account: String,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_time: Option<DateTime<Utc>>,
    pub exit_price: Option<f64>,
    pub fees: f64,
    pub pnl: Option<f64>,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.exit_time.is_some()
    }
}

/// A social-feed post as seen by the ranking and moderation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
}
