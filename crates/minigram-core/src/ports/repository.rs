use async_trait::async_trait;

use crate::domain::{Activity, Like, NewActivity, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// User storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. A unique-email violation surfaces as
    /// [`RepoError::Constraint`].
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post storage.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Delete the post only if both id and author match.
    /// Returns whether a row was removed.
    async fn delete_by_id_and_author(&self, id: i64, author_id: i64) -> Result<bool, RepoError>;
}

/// Like storage.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn create(&self, user_id: i64, post_id: i64) -> Result<Like, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Like>, RepoError>;

    /// Delete the like only if both id and liker match.
    /// Returns whether a row was removed.
    async fn delete_by_id_and_user(&self, id: i64, user_id: i64) -> Result<bool, RepoError>;

    /// Likes on a post, newest first.
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Like>, RepoError>;

    async fn count_by_post(&self, post_id: i64) -> Result<i64, RepoError>;
}

/// Append-only activity log.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, activity: NewActivity) -> Result<(), RepoError>;

    /// Activity rows for one user, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Activity>, RepoError>;
}
