//! Authentication infrastructure - JWT tokens and Argon2 password hashing.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
