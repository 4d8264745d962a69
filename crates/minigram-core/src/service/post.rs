use std::sync::Arc;

use crate::domain::{
    ActivityAction, CreatePost, NewActivity, NewPost, Post, PostDetail,
};
use crate::error::DomainError;
use crate::ports::{ActivityRepository, JokeProvider, LikeRepository, PostRepository};

/// Post creation, listing, detail, and ownership-checked deletion.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    likes: Arc<dyn LikeRepository>,
    activities: Arc<dyn ActivityRepository>,
    jokes: Option<Arc<dyn JokeProvider>>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        likes: Arc<dyn LikeRepository>,
        activities: Arc<dyn ActivityRepository>,
        jokes: Option<Arc<dyn JokeProvider>>,
    ) -> Self {
        Self {
            posts,
            likes,
            activities,
            jokes,
        }
    }

    /// Create a post for `author_id`, appending a fetched joke to the
    /// content when a provider is configured. A failed fetch is logged and
    /// the post is created without it.
    pub async fn create(&self, author_id: i64, input: CreatePost) -> Result<Post, DomainError> {
        if input.title.trim().is_empty() {
            return Err(DomainError::BadInput("title must not be empty".to_string()));
        }

        let mut content = input.content.unwrap_or_default();
        if let Some(jokes) = &self.jokes {
            match jokes.fetch_joke().await {
                Ok(joke) => {
                    if content.is_empty() {
                        content = format!("Joke of the day: {joke}");
                    } else {
                        content.push_str("\n\nJoke of the day: ");
                        content.push_str(&joke);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "joke fetch failed, creating post without it");
                }
            }
        }

        let post = self
            .posts
            .create(NewPost {
                title: input.title,
                content,
                author_id,
            })
            .await?;

        self.record_activity(
            author_id,
            ActivityAction::PostCreate,
            format!("created post id={} title={:?}", post.id, post.title),
        )
        .await;

        Ok(post)
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_all().await?)
    }

    /// A post with its like list and like count. The secondary reads are
    /// best-effort: a failure yields an empty list or zero count.
    pub async fn detail(&self, id: i64) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;

        let likes = match self.likes.list_by_post(id).await {
            Ok(likes) => likes,
            Err(err) => {
                tracing::warn!(post_id = id, error = %err, "like list read failed");
                Vec::new()
            }
        };
        let likes_count = match self.likes.count_by_post(id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(post_id = id, error = %err, "like count read failed");
                0
            }
        };

        Ok(PostDetail {
            post,
            likes,
            likes_count,
        })
    }

    /// Delete a post the caller owns. A miss on the conditional delete is
    /// disambiguated with a follow-up read: the post either belongs to
    /// someone else or does not exist.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), DomainError> {
        let deleted = self.posts.delete_by_id_and_author(id, user_id).await?;
        if deleted {
            self.record_activity(
                user_id,
                ActivityAction::PostDelete,
                format!("deleted post id={id}"),
            )
            .await;
            return Ok(());
        }

        match self.posts.find_by_id(id).await {
            Ok(Some(_)) => Err(DomainError::NotOwner { entity: "post" }),
            _ => Err(DomainError::NotFound { entity: "post" }),
        }
    }

    // The audit trail is best-effort: a failed write never alters the
    // outcome of the operation that triggered it.
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
    use crate::ports::LikeRepository as _;
    use crate::service::fakes::{MemoryActivities, MemoryLikes, MemoryPosts, StaticJokes};

    struct Setup {
        posts: Arc<MemoryPosts>,
        likes: Arc<MemoryLikes>,
        activities: Arc<MemoryActivities>,
    }

    fn service(jokes: Option<Arc<dyn JokeProvider>>) -> (PostService, Setup) {
        let posts = Arc::new(MemoryPosts::new());
        let likes = Arc::new(MemoryLikes::new());
        let activities = Arc::new(MemoryActivities::new());
        let service = PostService::new(posts.clone(), likes.clone(), activities.clone(), jokes);
        (
            service,
            Setup {
                posts,
                likes,
                activities,
            },
        )
    }

    fn input(title: &str, content: Option<&str>) -> CreatePost {
        CreatePost {
            title: title.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let (service, setup) = service(None);

        let err = service.create(1, input("  ", None)).await.unwrap_err();

        assert!(matches!(err, DomainError::BadInput(_)));
        assert_eq!(setup.posts.len(), 0);
    }

    #[tokio::test]
    async fn create_appends_joke_to_existing_content() {
        let (service, _) = service(Some(Arc::new(StaticJokes::telling("why not"))));

        let post = service.create(1, input("hi", Some("hello"))).await.unwrap();

        assert_eq!(post.content, "hello\n\nJoke of the day: why not");
    }

    #[tokio::test]
    async fn create_uses_joke_as_content_when_body_is_empty() {
        let (service, _) = service(Some(Arc::new(StaticJokes::telling("why not"))));

        let post = service.create(1, input("hi", None)).await.unwrap();

        assert_eq!(post.content, "Joke of the day: why not");
    }

    #[tokio::test]
    async fn create_survives_joke_fetch_failure() {
        let (service, _) = service(Some(Arc::new(StaticJokes::failing())));

        let post = service.create(1, input("hi", Some("hello"))).await.unwrap();

        assert_eq!(post.content, "hello");
    }

    #[tokio::test]
    async fn create_records_post_create_activity() {
        let (service, setup) = service(None);

        let post = service.create(7, input("hi", None)).await.unwrap();

        let recorded = setup.activities.all();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].user_id, 7);
        assert_eq!(recorded[0].action, "POST_CREATE");
        assert!(recorded[0].description.contains(&post.id.to_string()));
    }

    #[tokio::test]
    async fn create_outlives_activity_write_failure() {
        let (service, setup) = service(None);
        setup.activities.fail_writes();

        let post = service.create(1, input("hi", None)).await.unwrap();

        assert_eq!(post.title, "hi");
        assert_eq!(setup.posts.len(), 1);
    }

    #[tokio::test]
    async fn detail_of_unknown_post_is_not_found() {
        let (service, _) = service(None);

        let err = service.detail(42).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "post" }));
    }

    #[tokio::test]
    async fn detail_includes_likes_and_count() {
        let (service, setup) = service(None);
        let post = service.create(1, input("hi", None)).await.unwrap();
        setup.likes.create(2, post.id).await.unwrap();
        setup.likes.create(3, post.id).await.unwrap();

        let detail = service.detail(post.id).await.unwrap();

        assert_eq!(detail.likes.len(), 2);
        assert_eq!(detail.likes_count, 2);
    }

    #[tokio::test]
    async fn detail_count_is_zero_for_unliked_post() {
        let (service, _) = service(None);
        let post = service.create(1, input("hi", None)).await.unwrap();

        let detail = service.detail(post.id).await.unwrap();

        assert!(detail.likes.is_empty());
        assert_eq!(detail.likes_count, 0);
    }

    #[tokio::test]
    async fn detail_degrades_when_like_reads_fail() {
        let (service, setup) = service(None);
        let post = service.create(1, input("hi", None)).await.unwrap();
        setup.likes.fail_reads();

        let detail = service.detail(post.id).await.unwrap();

        assert!(detail.likes.is_empty());
        assert_eq!(detail.likes_count, 0);
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_forbidden() {
        let (service, _) = service(None);
        let post = service.create(1, input("hi", None)).await.unwrap();

        let err = service.delete(post.id, 2).await.unwrap_err();

        assert!(matches!(err, DomainError::NotOwner { entity: "post" }));
    }

    #[tokio::test]
    async fn delete_of_missing_post_is_not_found() {
        let (service, _) = service(None);

        let err = service.delete(42, 1).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity: "post" }));
    }

    #[tokio::test]
    async fn delete_by_owner_removes_row_and_records_activity() {
        let (service, setup) = service(None);
        let post = service.create(1, input("hi", None)).await.unwrap();

        service.delete(post.id, 1).await.unwrap();

        assert_eq!(setup.posts.len(), 0);
        let recorded = setup.activities.all();
        assert_eq!(recorded.last().unwrap().action, "POST_DELETE");
    }
}
