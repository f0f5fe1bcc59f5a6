// Module hub for the TradeJournal service: the JournalService struct, its
// trait impl, and one submodule per RPC handler.

use super::{
    ImportTradesRequest, ImportTradesResponse, MarketDataRequest, MarketDataResponse,
    ModerateContentRequest, ModerateContentResponse, RankFeedRequest, RankFeedResponse,
    TradeJournal, TradeSummaryRequest, TradeSummaryResponse,
};
use crate::data::market_data::MarketDataStore;
use crate::data::trade_log::TradeLog;
use crate::feed::moderation::ModerationConfig;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

pub mod get_market_data;
pub mod get_trade_summary;
pub mod helpers;
pub mod import_trades;
pub mod moderate_content;
pub mod rank_feed;

pub struct JournalService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    trade_log: Arc<RwLock<TradeLog>>,
    moderation: ModerationConfig,
}

impl JournalService {
    pub fn new(
        market_data_store: Arc<RwLock<MarketDataStore>>,
        trade_log: Arc<RwLock<TradeLog>>,
        moderation: ModerationConfig,
    ) -> Self {
        JournalService {
            market_data_store,
            trade_log,
            moderation,
        }
    }
}

#[tonic::async_trait]
impl TradeJournal for JournalService {
    async fn import_trades(
        &self,
        request: Request<ImportTradesRequest>,
    ) -> Result<Response<ImportTradesResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            account = %req_payload.account,
            path = %req_payload.file_path,
            "Received ImportTradesRequest, dispatching to handler."
        );
        import_trades::handle_import_trades(req_payload, self.trade_log.clone()).await
    }

    async fn get_trade_summary(
        &self,
        request: Request<TradeSummaryRequest>,
    ) -> Result<Response<TradeSummaryResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            account = %req_payload.account,
            "Received TradeSummaryRequest, dispatching to handler."
        );
        get_trade_summary::handle_get_trade_summary(req_payload, self.trade_log.clone()).await
    }

    type GetMarketDataStream = ReceiverStream<Result<MarketDataResponse, Status>>;

    async fn get_market_data(
        &self,
        request: Request<MarketDataRequest>,
    ) -> Result<Response<Self::GetMarketDataStream>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            symbol = %req_payload.symbol,
            timeframe = %req_payload.timeframe,
            from_timestamp_ms = req_payload.from_timestamp,
            to_timestamp_ms = req_payload.to_timestamp,
            "Received GetMarketDataRequest, dispatching to handler."
        );
        get_market_data::handle_get_market_data(req_payload, self.market_data_store.clone()).await
    }

    async fn rank_feed(
        &self,
        request: Request<RankFeedRequest>,
    ) -> Result<Response<RankFeedResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            post_count = req_payload.posts.len(),
            followed_count = req_payload.followed_user_ids.len(),
            "Received RankFeedRequest, dispatching to handler."
        );
        rank_feed::handle_rank_feed(req_payload).await
    }

    async fn moderate_content(
        &self,
        request: Request<ModerateContentRequest>,
    ) -> Result<Response<ModerateContentResponse>, Status> {
        let req_payload = request.into_inner();
        tracing::info!(
            content_len = req_payload.content.chars().count(),
            "Received ModerateContentRequest, dispatching to handler."
        );
        moderate_content::handle_moderate_content(req_payload, &self.moderation).await
    }
}
