//! Application state - shared across all handlers.

use std::sync::Arc;

use minigram_core::ports::{JokeProvider, PasswordService, TokenService};
use minigram_core::service::{ActivityService, AuthService, LikeService, PostService};
use minigram_infra::database::{
    self, DbErr, PostgresActivityRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository,
};
use minigram_infra::{ApiNinjasJokeClient, Argon2PasswordService, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state: the four domain services plus the token
/// service the auth extractor verifies against.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub likes: Arc<LikeService>,
    pub activities: Arc<ActivityService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Connect to the database and wire repositories into services.
    pub async fn init(config: &AppConfig) -> Result<Self, DbErr> {
        let db = database::connect(&config.database).await?;

        let users = Arc::new(PostgresUserRepository::new(db.clone()));
        let posts_repo = Arc::new(PostgresPostRepository::new(db.clone()));
        let likes_repo = Arc::new(PostgresLikeRepository::new(db.clone()));
        let activities_repo = Arc::new(PostgresActivityRepository::new(db));

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let jokes: Option<Arc<dyn JokeProvider>> = match &config.joke_api_key {
            Some(key) => Some(Arc::new(ApiNinjasJokeClient::new(key.clone()))),
            None => {
                tracing::warn!("API_NINJAS_KEY not set; posts are created without joke enrichment");
                None
            }
        };

        let state = Self {
            auth: Arc::new(AuthService::new(users, tokens.clone(), passwords)),
            posts: Arc::new(PostService::new(
                posts_repo.clone(),
                likes_repo.clone(),
                activities_repo.clone(),
                jokes,
            )),
            likes: Arc::new(LikeService::new(
                likes_repo,
                posts_repo,
                activities_repo.clone(),
            )),
            activities: Arc::new(ActivityService::new(activities_repo)),
            tokens,
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
