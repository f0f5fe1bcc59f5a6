// Handler for the ImportTrades RPC
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::{Response, Status};

use crate::data::csv_parser::TradeCsvParser;
use crate::data::trade_log::TradeLog;
use crate::error::JournalError;
use crate::services::{ImportTradesRequest, ImportTradesResponse};

pub async fn handle_import_trades(
    req_payload: ImportTradesRequest,
    trade_log: Arc<RwLock<TradeLog>>,
) -> Result<Response<ImportTradesResponse>, Status> {
    let trades = match TradeCsvParser::load_trades_from_csv(
        &req_payload.file_path,
        &req_payload.account,
    ) {
        Ok(trades) => trades,
        Err(e) => {
            tracing::error!(
                account = %req_payload.account,
                path = %req_payload.file_path,
                error_detail = ?e,
                "Failed to parse trade CSV"
            );
            return Err(JournalError::CsvDataFormatError(e.to_string()).into());
        }
    };

    let trades_imported = trades.len() as i32;
    let mut log = trade_log.write().await;
    log.add_trades(&req_payload.account, trades);

    tracing::info!(
        account = %req_payload.account,
        count = trades_imported,
        "Imported trades into log"
    );
    Ok(Response::new(ImportTradesResponse {
        success: true,
        message: format!(
            "Imported {} trades for account {}",
            trades_imported, req_payload.account
        ),
        trades_imported,
    }))
}
