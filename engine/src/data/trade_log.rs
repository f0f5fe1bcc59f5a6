// In-memory store of imported journal trades, per account.
use serde::Serialize;
use shared::models::Trade;
use shared::utils::win_rate;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct TradeLog {
    trades: HashMap<String, Vec<Trade>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub open_trades: usize,
    pub winners: usize,
    pub losers: usize,
    /// Fraction of closed trades with positive PnL, in [0, 1].
    pub win_rate: f64,
    pub net_pnl: f64,
    pub total_fees: f64,
}

impl TradeLog {
    pub fn new() -> Self {
        TradeLog {
            trades: HashMap::new(),
        }
    }

    /// Adds trades to an account's log, keeping the log ordered by entry
    /// time and ignoring trades whose id is already present.
    pub fn add_trades(&mut self, account: &str, new_trades: Vec<Trade>) {
        let log = self.trades.entry(account.to_string()).or_default();
        let seen: HashSet<Uuid> = log.iter().map(|t| t.id).collect();
        log.extend(new_trades.into_iter().filter(|t| !seen.contains(&t.id)));
        log.sort_by_key(|t| t.entry_time);
    }

    pub fn get_trades(&self, account: &str) -> Option<&[Trade]> {
        self.trades.get(account).map(Vec::as_slice)
    }

    pub fn summary(&self, account: &str) -> Option<TradeSummary> {
        let trades = self.trades.get(account)?;

        let open_trades = trades.iter().filter(|t| !t.is_closed()).count();
        let closed = trades.len() - open_trades;
        let winners = trades
            .iter()
            .filter(|t| t.pnl.map_or(false, |p| p > 0.0))
            .count();
        let losers = trades
            .iter()
            .filter(|t| t.pnl.map_or(false, |p| p < 0.0))
            .count();

        Some(TradeSummary {
            total_trades: trades.len(),
            open_trades,
            winners,
            losers,
            win_rate: win_rate(winners, closed),
            net_pnl: trades.iter().filter_map(|t| t.pnl).sum(),
            total_fees: trades.iter().map(|t| t.fees).sum(),
        })
    }
}

impl Default for TradeLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::TradeSide;

    fn trade(entry_secs: i64, pnl: Option<f64>, fees: f64) -> Trade {
        Trade {
            id: Uuid::new_v4(),
            account: "main".to_string(),
            symbol: "BTCUSDT".to_string(),
            side: TradeSide::Long,
            quantity: 1.0,
            entry_time: Utc.timestamp_opt(entry_secs, 0).unwrap(),
            entry_price: 100.0,
            exit_time: pnl.map(|_| Utc.timestamp_opt(entry_secs + 60, 0).unwrap()),
            exit_price: pnl.map(|p| 100.0 + p),
            fees,
            pnl,
        }
    }

    #[test]
    fn add_orders_by_entry_time_and_dedups_ids() {
        let mut log = TradeLog::new();
        let dup = trade(200, None, 0.0);
        log.add_trades("main", vec![trade(300, None, 0.0), dup.clone()]);
        log.add_trades("main", vec![dup, trade(100, None, 0.0)]);

        let trades = log.get_trades("main").unwrap();
        assert_eq!(trades.len(), 3);
        assert!(trades.windows(2).all(|w| w[0].entry_time <= w[1].entry_time));
    }

    #[test]
    fn summary_counts_and_win_rate() {
        let mut log = TradeLog::new();
        log.add_trades(
            "main",
            vec![
                trade(100, Some(50.0), 1.0),
                trade(200, Some(-20.0), 1.0),
                trade(300, Some(10.0), 0.5),
                trade(400, None, 0.0), // still open
            ],
        );

        let summary = log.summary("main").unwrap();
        assert_eq!(summary.total_trades, 4);
        assert_eq!(summary.open_trades, 1);
        assert_eq!(summary.winners, 2);
        assert_eq!(summary.losers, 1);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.net_pnl - 40.0).abs() < 1e-9);
        assert!((summary.total_fees - 2.5).abs() < 1e-9);
    }

    #[test]
    fn summary_unknown_account_is_none() {
        let log = TradeLog::new();
        assert!(log.summary("ghost").is_none());
    }
}
