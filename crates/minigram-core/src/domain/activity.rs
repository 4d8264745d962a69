use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity entity - an append-only audit record of a user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Action tags recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    PostCreate,
    PostDelete,
    LikeCreate,
    LikeDelete,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::PostCreate => "POST_CREATE",
            ActivityAction::PostDelete => "POST_DELETE",
            ActivityAction::LikeCreate => "LIKE_CREATE",
            ActivityAction::LikeDelete => "LIKE_DELETE",
        }
    }
}

/// Audit entry to append.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: i64,
    pub action: ActivityAction,
    pub description: String,
}
