//! Schema migrations for Minigram.

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;
mod m20250601_000002_create_posts;
mod m20250601_000003_create_likes;
mod m20250601_000004_create_activities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250601_000002_create_posts::Migration),
            Box::new(m20250601_000003_create_likes::Migration),
            Box::new(m20250601_000004_create_activities::Migration),
        ]
    }
}
