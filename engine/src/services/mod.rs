// gRPC service surface: generated protocol types plus the TradeJournal
// service implementation.

pub mod journal_service;

pub mod generated {
    tonic::include_proto!("journal");
}

pub use generated::trade_journal_server::{TradeJournal, TradeJournalServer};
pub use generated::{
    Candle as ProtoCandle, ImportTradesRequest, ImportTradesResponse, MarketDataRequest,
    MarketDataResponse, ModerateContentRequest, ModerateContentResponse, Post as ProtoPost,
    RankFeedRequest, RankFeedResponse, TradeSummaryRequest, TradeSummaryResponse,
};
