//! Argon2 password hashing.
//!
//! Hashes carry their own salt and parameters in PHC string form, so
//! verification needs nothing beyond the stored hash itself.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use minigram_core::ports::{AuthError, PasswordService};

/// [`PasswordService`] backed by Argon2id with a fresh random salt per hash.
#[derive(Default)]
pub struct Argon2PasswordService;

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    // A mismatch is a plain `false`; only a malformed stored hash is an
    // error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_and_rejects_wrong_password() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("secure_password_123").unwrap();

        assert!(service.verify("secure_password_123", &hash).unwrap());
        assert!(!service.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let service = Argon2PasswordService::new();

        let first = service.hash("secure_password_123").unwrap();
        let second = service.hash("secure_password_123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let service = Argon2PasswordService::new();

        assert!(service.verify("anything", "not-a-phc-string").is_err());
    }
}
