//! Authentication ports.

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i64,
    pub exp: i64,
}

/// Token service trait for bearer-token operations.
pub trait TokenService: Send + Sync {
    /// Issue a signed token with the user id as subject.
    fn issue(&self, user_id: i64) -> Result<String, AuthError>;

    /// Verify signature and expiry, and decode the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
