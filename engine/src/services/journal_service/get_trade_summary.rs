// Handler for the GetTradeSummary RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::trade_log::TradeLog;
use crate::error::JournalError;
use crate::services::{TradeSummaryRequest, TradeSummaryResponse};
use shared::utils::format_pnl;

pub async fn handle_get_trade_summary(
    req_payload: TradeSummaryRequest,
    trade_log: Arc<RwLock<TradeLog>>,
) -> Result<Response<TradeSummaryResponse>, Status> {
    let log = trade_log.read().await;
    let summary = log.summary(&req_payload.account).ok_or_else(|| {
        JournalError::TradeLogError(format!(
            "No trades found for account '{}'",
            req_payload.account
        ))
    })?;
    drop(log);

    tracing::info!(
        account = %req_payload.account,
        total = summary.total_trades,
        net_pnl = %format_pnl(summary.net_pnl),
        "Computed trade summary"
    );
    Ok(Response::new(TradeSummaryResponse {
        total_trades: summary.total_trades as i32,
        open_trades: summary.open_trades as i32,
        winners: summary.winners as i32,
        losers: summary.losers as i32,
        win_rate: summary.win_rate,
        net_pnl: summary.net_pnl,
        total_fees: summary.total_fees,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{Trade, TradeSide};
    use uuid::Uuid;

    #[tokio::test]
    async fn summary_for_unknown_account_is_not_found() {
        let trade_log = Arc::new(RwLock::new(TradeLog::new()));
        let status = handle_get_trade_summary(
            TradeSummaryRequest {
                account: "ghost".to_string(),
            },
            trade_log,
        )
        .await
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }

    #[tokio::test]
    async fn summary_reports_stored_trades() {
        let trade_log = Arc::new(RwLock::new(TradeLog::new()));
        trade_log.write().await.add_trades(
            "main",
            vec![Trade {
                id: Uuid::new_v4(),
                account: "main".to_string(),
                symbol: "BTCUSDT".to_string(),
                side: TradeSide::Long,
                quantity: 1.0,
                entry_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                entry_price: 100.0,
                exit_time: Some(Utc.timestamp_opt(1_700_000_060, 0).unwrap()),
                exit_price: Some(110.0),
                fees: 1.0,
                pnl: Some(9.0),
            }],
        );

        let response = handle_get_trade_summary(
            TradeSummaryRequest {
                account: "main".to_string(),
            },
            trade_log,
        )
        .await
        .unwrap()
        .into_inner();

        assert_eq!(response.total_trades, 1);
        assert_eq!(response.winners, 1);
        assert!((response.net_pnl - 9.0).abs() < 1e-9);
        assert!((response.win_rate - 1.0).abs() < 1e-9);
    }
}
