use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like entity - one row per like action on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}
