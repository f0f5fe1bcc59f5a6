// Engine main entry point
use engine::config::settings::EngineSettings;
use engine::data::market_data::MarketDataStore;
use engine::data::trade_log::TradeLog;
use engine::feed::moderation::ModerationConfig;
use engine::services::journal_service::JournalService;
use engine::services::TradeJournalServer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting Trade Journal Engine...");

    let settings = EngineSettings::default();
    let addr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("Engine will listen on {}", addr);

    let market_data_store = Arc::new(RwLock::new(MarketDataStore::new()));
    let trade_log = Arc::new(RwLock::new(TradeLog::new()));
    let moderation = ModerationConfig {
        max_length: settings.max_post_length,
        ..ModerationConfig::default()
    };

    let journal_service = JournalService::new(market_data_store, trade_log, moderation);

    Server::builder()
        .add_service(TradeJournalServer::new(journal_service))
        .serve(addr)
        .await?;

    Ok(())
}
