//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: Option<String>,
}

/// Request to like a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLikeRequest {
    pub post_id: i64,
}

/// A user's public information; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Registration/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Acknowledgement for delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: i64,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: "deleted".to_string(),
            id,
        }
    }
}
