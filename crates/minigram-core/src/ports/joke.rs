//! Joke provider port - third-party text snippets appended to posts.

use async_trait::async_trait;

/// Fetches a short joke from an external API. Callers treat every failure
/// as non-fatal.
#[async_trait]
pub trait JokeProvider: Send + Sync {
    async fn fetch_joke(&self) -> Result<String, JokeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JokeError {
    #[error("joke api key is not configured")]
    MissingApiKey,

    #[error("joke api request failed: {0}")]
    Request(String),

    #[error("joke api returned status {0}")]
    Status(u16),

    #[error("joke api returned no joke")]
    Empty,
}
