use std::sync::Arc;

use crate::domain::{Credentials, NewUser, RegisterUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Registration and login.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Create an account and issue a bearer token for it.
    pub async fn register(&self, req: RegisterUser) -> Result<(User, String), DomainError> {
        let password_hash = self
            .passwords
            .hash(&req.password)
            .map_err(|e| DomainError::BadInput(format!("password cannot be hashed: {e}")))?;

        let user = self
            .users
            .create(NewUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                username: req.username,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                RepoError::Constraint(_) => DomainError::EmailTaken,
                other => other.into(),
            })?;

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok((user, token))
    }

    /// Verify credentials and issue a token.
    ///
    /// An unknown email and a wrong password produce the same error, so the
    /// response does not reveal whether the account exists.
    pub async fn login(&self, creds: Credentials) -> Result<(User, String), DomainError> {
        let user = self
            .users
            .find_by_email(&creds.email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(&creds.password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::{FakeTokens, MemoryUsers, PlainPasswords};

    fn register_input(email: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            username: "ada".to_string(),
            password: "engine123".to_string(),
        }
    }

    fn service() -> (AuthService, Arc<MemoryUsers>) {
        let users = Arc::new(MemoryUsers::new());
        let service = AuthService::new(
            users.clone(),
            Arc::new(FakeTokens),
            Arc::new(PlainPasswords),
        );
        (service, users)
    }

    #[tokio::test]
    async fn register_issues_token_for_new_user() {
        let (service, _) = service();

        let (user, token) = service.register(register_input("ada@example.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(token, "token-for-1");
        assert_ne!(user.password_hash, "engine123");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_creates_no_second_row() {
        let (service, users) = service();

        service.register(register_input("ada@example.com")).await.unwrap();
        let err = service
            .register(register_input("ada@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmailTaken));
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() {
        let (service, _) = service();
        service.register(register_input("ada@example.com")).await.unwrap();

        let err = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails_the_same_way() {
        let (service, _) = service();

        let err = service
            .login(Credentials {
                email: "nobody@example.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        // Same variant as the wrong-password case: no user-existence leak.
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_correct_password_issues_token() {
        let (service, _) = service();
        service.register(register_input("ada@example.com")).await.unwrap();

        let (user, token) = service
            .login(Credentials {
                email: "ada@example.com".to_string(),
                password: "engine123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(token, "token-for-1");
    }
}
