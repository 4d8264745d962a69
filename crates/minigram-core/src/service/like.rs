use std::sync::Arc;

use crate::domain::{ActivityAction, Like, NewActivity};
use crate::error::DomainError;
use crate::ports::{ActivityRepository, LikeRepository, PostRepository};

/// Liking and unliking posts.
pub struct LikeService {
    likes: Arc<dyn LikeRepository>,
    posts: Arc<dyn PostRepository>,
    activities: Arc<dyn ActivityRepository>,
}

impl LikeService {
    pub fn new(
        likes: Arc<dyn LikeRepository>,
        posts: Arc<dyn PostRepository>,
        activities: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            likes,
            posts,
            activities,
        }
    }

    /// Like a post. The post must exist before any row is inserted.
    pub async fn create(&self, user_id: i64, post_id: i64) -> Result<Like, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::NotFound { entity: "post" });
        }

        let like = self.likes.create(user_id, post_id).await?;

        self.record_activity(
            user_id,
            ActivityAction::LikeCreate,
            format!("liked post id={post_id}"),
        )
        .await;

        Ok(like)
    }

    pub async fn detail(&self, id: i64) -> Result<Like, DomainError> {
        self.likes
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "like" })
    }

    /// Remove a like the caller placed. Uses the same two-case policy as
    /// post deletion: a miss on the conditional delete is disambiguated
    /// with a follow-up read.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), DomainError> {
        let deleted = self.likes.delete_by_id_and_user(id, user_id).await?;
        if deleted {
            self.record_activity(
                user_id,
                ActivityAction::LikeDelete,
                format!("removed like id={id}"),
            )
            .await;
            return Ok(());
        }

        match self.likes.find_by_id(id).await {
            Ok(Some(_)) => Err(DomainError::NotOwner { entity: "like" }),
            _ => Err(DomainError::NotFound { entity: "like" }),
        }
    }

    async fn record_activity(&self, user_id: i64, action: ActivityAction, description: String) {
        if let Err(err) = self
            .activities
            .record(NewActivity {
                user_id,
                action,
                description,
            })
            .await
        {
            tracing::warn!(user_id, action = action.as_str(), error = %err, "activity record dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;
    use crate::ports::PostRepository as _;
    use crate::service::fakes::{MemoryActivities, MemoryLikes, MemoryPosts};

    struct Setup {
        posts: Arc<MemoryPosts>,
        likes: Arc<MemoryLikes>,
        activities: Arc<MemoryActivities>,
    }

    fn service() -> (LikeService, Setup) {
        let posts = Arc::new(MemoryPosts::new());
        let likes = Arc::new(MemoryLikes::new());
        let activities = Arc::new(MemoryActivities::new());
        let service = LikeService::new(likes.clone(), posts.clone(), activities.clone());
        (
            service,
            Setup {
                posts,
                likes,
                activities,
            },
        )
    }

    async fn seed_post(setup: &Setup) -> i64 {
        setup
            .posts
            .create(NewPost {
                title: "hi".to_string(),
                content: String::new(),
                author_id: 1,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_for_missing_post_inserts_nothing() {
        let (service, setup) = service();

        let err = service.create(1, 999_999).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "post" }));
        assert_eq!(setup.likes.len(), 0);
    }

    #[tokio::test]
    async fn create_records_like_create_activity() {
        let (service, setup) = service();
        let post_id = seed_post(&setup).await;

        let like = service.create(5, post_id).await.unwrap();

        assert_eq!(like.post_id, post_id);
        let recorded = setup.activities.all();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].action, "LIKE_CREATE");
        assert_eq!(recorded[0].user_id, 5);
    }

    #[tokio::test]
    async fn detail_of_unknown_like_is_not_found() {
        let (service, _) = service();

        let err = service.detail(42).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "like" }));
    }

    #[tokio::test]
    async fn delete_by_someone_else_is_forbidden() {
        let (service, setup) = service();
        let post_id = seed_post(&setup).await;
        let like = service.create(5, post_id).await.unwrap();

        let err = service.delete(like.id, 6).await.unwrap_err();

        assert!(matches!(err, DomainError::NotOwner { entity: "like" }));
        assert_eq!(setup.likes.len(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_like_is_not_found() {
        let (service, _) = service();

        let err = service.delete(42, 1).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "like" }));
    }

    #[tokio::test]
    async fn delete_by_liker_removes_row_and_records_activity() {
        let (service, setup) = service();
        let post_id = seed_post(&setup).await;
        let like = service.create(5, post_id).await.unwrap();

        service.delete(like.id, 5).await.unwrap();

        assert_eq!(setup.likes.len(), 0);
        assert_eq!(setup.activities.all().last().unwrap().action, "LIKE_DELETE");
    }
}
