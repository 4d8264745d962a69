//! SeaORM entities and conversions to the domain types.

pub mod activity;
pub mod like;
pub mod post;
pub mod user;
