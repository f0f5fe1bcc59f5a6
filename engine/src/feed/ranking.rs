//! Feed ordering: followed-user posts interleaved with trending posts.

use shared::models::Post;
use std::collections::HashSet;
use uuid::Uuid;

// Two followed posts for every trending post, roughly a 60/40 split.
const FOLLOWED_RUN: usize = 2;
const TRENDING_RUN: usize = 1;

/// Reorders `posts` for a viewer: posts by followed authors (and the
/// viewer's own) most-recent-first, the rest by like count descending,
/// interleaved two-followed/one-trending until both pools drain. Every
/// input post appears exactly once. Pure and deterministic.
pub fn rank_feed(posts: &[Post], followed: &HashSet<Uuid>, current_user: Option<Uuid>) -> Vec<Post> {
    let mut followed_pool: Vec<&Post> = posts
        .iter()
        .filter(|p| followed.contains(&p.author_id) || current_user == Some(p.author_id))
        .collect();
    followed_pool.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let followed_ids: HashSet<Uuid> = followed_pool.iter().map(|p| p.id).collect();
    let mut trending_pool: Vec<&Post> = posts
        .iter()
        .filter(|p| !followed_ids.contains(&p.id))
        .collect();
    trending_pool.sort_by(|a, b| b.likes.cmp(&a.likes));

    let mut ranked = Vec::with_capacity(posts.len());
    let mut followed_iter = followed_pool.into_iter();
    let mut trending_iter = trending_pool.into_iter();
    loop {
        let mut emitted = false;
        for _ in 0..FOLLOWED_RUN {
            if let Some(post) = followed_iter.next() {
                ranked.push(post.clone());
                emitted = true;
            }
        }
        for _ in 0..TRENDING_RUN {
            if let Some(post) = trending_iter.next() {
                ranked.push(post.clone());
                emitted = true;
            }
        }
        if !emitted {
            break;
        }
    }
    ranked
}
