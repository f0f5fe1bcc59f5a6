// Proto <-> domain conversions shared by the RPC handlers.
use crate::error::JournalError;
use crate::services::{ProtoCandle, ProtoPost};
use shared::models::{Candle as DomainCandle, Post as DomainPost};
use shared::utils::{datetime_from_millis, millis_from_datetime};
use uuid::Uuid;

pub fn to_proto_candle(domain_candle: &DomainCandle) -> ProtoCandle {
    ProtoCandle {
        symbol: domain_candle.symbol.clone(),
        timestamp: millis_from_datetime(domain_candle.timestamp),
        open: domain_candle.open,
        high: domain_candle.high,
        low: domain_candle.low,
        close: domain_candle.close,
        volume: domain_candle.volume,
        trades: domain_candle.trades as i32,
    }
}

pub fn from_proto_timestamp(ts_millis: i64) -> Result<chrono::DateTime<chrono::Utc>, JournalError> {
    datetime_from_millis(ts_millis)
        .ok_or_else(|| JournalError::ProcessingError(format!("Invalid timestamp: {}", ts_millis)))
}

pub fn to_proto_post(domain_post: &DomainPost) -> ProtoPost {
    ProtoPost {
        id: domain_post.id.to_string(),
        author_id: domain_post.author_id.to_string(),
        content: domain_post.content.clone(),
        created_at: millis_from_datetime(domain_post.created_at),
        likes: domain_post.likes,
    }
}

pub fn from_proto_post(proto_post: &ProtoPost) -> Result<DomainPost, JournalError> {
    Ok(DomainPost {
        id: parse_user_id(&proto_post.id)?,
        author_id: parse_user_id(&proto_post.author_id)?,
        content: proto_post.content.clone(),
        created_at: from_proto_timestamp(proto_post.created_at)?,
        likes: proto_post.likes,
    })
}

pub fn parse_user_id(id: &str) -> Result<Uuid, JournalError> {
    Uuid::parse_str(id)
        .map_err(|e| JournalError::FeedError(format!("Invalid user/post id '{}': {}", id, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn post_round_trips_through_proto() {
        let post = DomainPost {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "gm traders".to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            likes: 7,
        };
        let back = from_proto_post(&to_proto_post(&post)).unwrap();
        assert_eq!(back.id, post.id);
        assert_eq!(back.author_id, post.author_id);
        assert_eq!(back.created_at, post.created_at);
        assert_eq!(back.likes, 7);
    }

    #[test]
    fn bad_uuid_is_a_feed_error() {
        assert!(matches!(
            parse_user_id("not-a-uuid"),
            Err(JournalError::FeedError(_))
        ));
    }
}
