//! Social-feed utilities: deterministic ranking and pre-post moderation.

pub mod moderation;
pub mod ranking;

pub use moderation::{moderate, ModerationConfig, ModerationOutcome, Severity};
pub use ranking::rank_feed;
