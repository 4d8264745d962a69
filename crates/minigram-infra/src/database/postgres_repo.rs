//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use minigram_core::domain::{Activity, Like, NewActivity, NewPost, NewUser, Post, User};
use minigram_core::error::RepoError;
use minigram_core::ports::{ActivityRepository, LikeRepository, PostRepository, UserRepository};

use super::entity::{activity, like, post, user};

/// Unique-key violations become [`RepoError::Constraint`] so services can
/// tell them apart from plain query failures.
fn map_db_err(err: DbErr) -> RepoError {
    let msg = err.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

fn query_err(err: DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let row = user::ActiveModel {
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = row.insert(&self.db).await.map_err(map_db_err)?;
        Ok(created.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let row = post::ActiveModel {
            title: Set(new_post.title),
            content: Set(new_post.content),
            author_id: Set(new_post.author_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = row.insert(&self.db).await.map_err(map_db_err)?;
        Ok(created.into())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = post::Entity::find()
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let row = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(row.map(Into::into))
    }

    async fn delete_by_id_and_author(&self, id: i64, author_id: i64) -> Result<bool, RepoError> {
        let result = post::Entity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }
}

/// PostgreSQL like repository.
pub struct PostgresLikeRepository {
    db: DbConn,
}

impl PostgresLikeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn create(&self, user_id: i64, post_id: i64) -> Result<Like, RepoError> {
        let row = like::ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = row.insert(&self.db).await.map_err(map_db_err)?;
        Ok(created.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Like>, RepoError> {
        let row = like::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(row.map(Into::into))
    }

    async fn delete_by_id_and_user(&self, id: i64, user_id: i64) -> Result<bool, RepoError> {
        let result = like::Entity::delete_many()
            .filter(like::Column::Id.eq(id))
            .filter(like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Like>, RepoError> {
        let rows = like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .order_by_desc(like::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_post(&self, post_id: i64) -> Result<i64, RepoError> {
        let count = like::Entity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_err)?;

        Ok(count as i64)
    }
}

/// PostgreSQL activity repository. Insert and per-user list only; the log
/// is append-only.
pub struct PostgresActivityRepository {
    db: DbConn,
}

impl PostgresActivityRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn record(&self, entry: NewActivity) -> Result<(), RepoError> {
        let row = activity::ActiveModel {
            user_id: Set(entry.user_id),
            action: Set(entry.action.as_str().to_string()),
            description: Set(entry.description),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        row.insert(&self.db).await.map_err(query_err)?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Activity>, RepoError> {
        let rows = activity::Entity::find()
            .filter(activity::Column::UserId.eq(user_id))
            .order_by_desc(activity::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
