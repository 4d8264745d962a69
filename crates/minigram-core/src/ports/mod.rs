//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod joke;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use joke::{JokeError, JokeProvider};
pub use repository::{ActivityRepository, LikeRepository, PostRepository, UserRepository};
