//! Database connection management and Postgres repositories.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect};
pub use postgres_repo::{
    PostgresActivityRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository,
};
pub use sea_orm::DbErr;

#[cfg(test)]
mod tests;
