// Handler for the RankFeed RPC
use std::collections::HashSet;
use tonic::{Response, Status};
use uuid::Uuid;

use super::helpers::{from_proto_post, parse_user_id, to_proto_post};
use crate::feed::ranking::rank_feed;
use crate::services::{RankFeedRequest, RankFeedResponse};
use shared::models::Post;

pub async fn handle_rank_feed(
    req_payload: RankFeedRequest,
) -> Result<Response<RankFeedResponse>, Status> {
    let posts: Vec<Post> = req_payload
        .posts
        .iter()
        .map(from_proto_post)
        .collect::<Result<_, _>>()?;

    let followed: HashSet<Uuid> = req_payload
        .followed_user_ids
        .iter()
        .map(|id| parse_user_id(id))
        .collect::<Result<_, _>>()?;

    let current_user = if req_payload.current_user_id.is_empty() {
        None
    } else {
        Some(parse_user_id(&req_payload.current_user_id)?)
    };

    let ranked = rank_feed(&posts, &followed, current_user);
    tracing::debug!(ranked_count = ranked.len(), "Ranked feed");

    Ok(Response::new(RankFeedResponse {
        posts: ranked.iter().map(to_proto_post).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ProtoPost;

    fn proto_post(author: Uuid, created_at: i64, likes: u32) -> ProtoPost {
        ProtoPost {
            id: Uuid::new_v4().to_string(),
            author_id: author.to_string(),
            content: "gm".to_string(),
            created_at,
            likes,
        }
    }

    #[tokio::test]
    async fn ranks_followed_before_trending() {
        let friend = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let response = handle_rank_feed(RankFeedRequest {
            posts: vec![
                proto_post(stranger, 1_000, 99),
                proto_post(friend, 2_000, 0),
            ],
            followed_user_ids: vec![friend.to_string()],
            current_user_id: String::new(),
        })
        .await
        .unwrap()
        .into_inner();

        assert_eq!(response.posts.len(), 2);
        assert_eq!(response.posts[0].author_id, friend.to_string());
    }

    #[tokio::test]
    async fn malformed_uuid_is_invalid_argument() {
        let status = handle_rank_feed(RankFeedRequest {
            posts: vec![],
            followed_user_ids: vec!["not-a-uuid".to_string()],
            current_user_id: String::new(),
        })
        .await
        .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
