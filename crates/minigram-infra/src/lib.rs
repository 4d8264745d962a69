//! # Minigram Infrastructure
//!
//! Concrete implementations of the ports defined in `minigram-core`:
//! PostgreSQL persistence via SeaORM, JWT + Argon2 authentication, and the
//! outbound joke API client.

pub mod auth;
pub mod database;
pub mod joke;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, connect};
pub use joke::ApiNinjasJokeClient;
