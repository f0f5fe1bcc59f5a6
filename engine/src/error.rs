use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data store error: {0}")]
    MarketDataError(String),

    #[error("Trade log error: {0}")]
    TradeLogError(String),

    #[error("Feed processing error: {0}")]
    FeedError(String),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    // Catch-all for anyhow errors bubbling out of the parsers
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<JournalError> for tonic::Status {
    fn from(err: JournalError) -> Self {
        tracing::error!(error_detail = ?err, "Mapping JournalError to tonic::Status");
        match err {
            JournalError::ConfigError(msg) => {
                tonic::Status::failed_precondition(format!("Configuration error: {}", msg))
            }
            JournalError::CsvSystemError { source } => {
                tonic::Status::invalid_argument(format!("CSV parsing system error: {}", source))
            }
            JournalError::IoError { source } => {
                tonic::Status::internal(format!("I/O error: {}", source))
            }
            JournalError::CsvDataFormatError(msg) => {
                tonic::Status::invalid_argument(format!("CSV data format error: {}", msg))
            }
            JournalError::MarketDataError(msg) | JournalError::TradeLogError(msg) => {
                if msg.to_lowercase().contains("not found") {
                    tonic::Status::not_found(msg)
                } else {
                    tonic::Status::internal(msg)
                }
            }
            JournalError::FeedError(msg) => tonic::Status::invalid_argument(msg),
            JournalError::ProcessingError(msg) => {
                tonic::Status::internal(format!("Processing error: {}", msg))
            }
            JournalError::AnyhowError(source) => {
                tonic::Status::internal(format!("An internal error occurred: {}", source))
            }
        }
    }
}
