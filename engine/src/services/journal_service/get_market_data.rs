// Handler for the GetMarketData RPC
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Response, Status};

use super::helpers::{from_proto_timestamp, to_proto_candle};
use crate::data::market_data::MarketDataStore;
use crate::services::{MarketDataRequest, MarketDataResponse, ProtoCandle};
use shared::models::TimeFrame;

pub async fn handle_get_market_data(
    req_payload: MarketDataRequest,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<Response<ReceiverStream<Result<MarketDataResponse, Status>>>, Status> {
    tracing::debug!(symbol = %req_payload.symbol, "Handling GetMarketDataRequest in dedicated handler");

    let timeframe: TimeFrame = req_payload
        .timeframe
        .parse()
        .map_err(|e: anyhow::Error| Status::invalid_argument(e.to_string()))?;

    // Zero means unbounded on the wire.
    let from_ts = match req_payload.from_timestamp {
        0 => None,
        millis => Some(from_proto_timestamp(millis)?),
    };
    let to_ts = match req_payload.to_timestamp {
        0 => None,
        millis => Some(from_proto_timestamp(millis)?),
    };

    let store = market_data_store.read().await;
    let candles = store.get_candles(&req_payload.symbol, timeframe, from_ts, to_ts);
    drop(store); // lock released before the stream task runs

    let (tx, rx) = mpsc::channel(4);
    let symbol_for_log = req_payload.symbol.clone();

    tokio::spawn(async move {
        if let Some(domain_candles) = candles {
            if domain_candles.is_empty() {
                tracing::warn!(symbol = %symbol_for_log, ?timeframe, "No market data found in the given range.");
                let response = MarketDataResponse { candles: vec![] };
                if let Err(e) = tx.send(Ok(response)).await {
                    tracing::error!(error = ?e, symbol = %symbol_for_log, "Failed to send empty market data to stream");
                }
                return;
            }
            let grpc_candles: Vec<ProtoCandle> = domain_candles.iter().map(to_proto_candle).collect();
            tracing::debug!(symbol = %symbol_for_log, count = grpc_candles.len(), "Streaming market data.");
            let response = MarketDataResponse { candles: grpc_candles };
            if let Err(e) = tx.send(Ok(response)).await {
                tracing::error!(error = ?e, symbol = %symbol_for_log, "Failed to send market data to stream");
            }
        } else {
            tracing::warn!(symbol = %symbol_for_log, ?timeframe, "No market data available for symbol/timeframe.");
            let status = Status::not_found(format!(
                "Market data not found for symbol '{}' and timeframe {:?}",
                symbol_for_log, timeframe
            ));
            if let Err(e) = tx.send(Err(status)).await {
                tracing::error!(error = ?e, symbol = %symbol_for_log, "Failed to send NotFound status to stream");
            }
        }
    });

    Ok(Response::new(ReceiverStream::new(rx)))
}
