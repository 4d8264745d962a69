use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::like::Like;

/// Post entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Post creation input as submitted by the author.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub content: Option<String>,
}

/// Fully assembled row to insert, content enrichment already applied.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

/// A post together with its likes.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub likes: Vec<Like>,
    pub likes_count: i64,
}
