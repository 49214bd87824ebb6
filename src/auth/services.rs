use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::auth::{
    jwt::TokenIssuer,
    password::{PasswordError, PasswordHasher},
    repo::{RepositoryError, UserRepository},
    repo_types::{User, UserResponse},
};
use crate::validator::{UserValidator, ValidationErrors};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Hashing(PasswordError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Signup and login. Holds no per-request state; share it behind an `Arc`.
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    validator: Arc<dyn UserValidator>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        validator: Arc<dyn UserValidator>,
        hasher: PasswordHasher,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            repo,
            validator,
            hasher,
            tokens,
        }
    }

    #[cfg(test)]
    pub(crate) fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    #[instrument(skip_all)]
    pub async fn sign_up(&self, user: User) -> Result<UserResponse, AuthError> {
        self.validator.validate_user(&user)?;

        let hasher = self.hasher;
        let User { email, password, .. } = user;
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(PasswordError::Hash(e.to_string())))?
            .map_err(AuthError::Hashing)?;

        let new_user = User {
            id: 0,
            email,
            password: digest,
        };
        let created = self.repo.create_user(&new_user).await?;

        info!(user_id = created.id, "user signed up");
        Ok(UserResponse::from(created))
    }

    /// Unknown email, lookup failure and wrong password all yield
    /// `InvalidCredentials`.
    #[instrument(skip_all)]
    pub async fn login(&self, user: User) -> Result<String, AuthError> {
        self.validator.validate_user(&user)?;

        let stored = match self.repo.get_user_by_email(&user.email).await {
            Ok(u) => u,
            Err(e) => {
                match e {
                    RepositoryError::NotFound => debug!("login unknown email"),
                    other => warn!(error = %other, "login lookup failed"),
                }
                self.spend_hash(user.password).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let hasher = self.hasher;
        let digest = stored.password;
        let password = user.password;
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| {
                warn!(error = %e, "verify task failed");
                AuthError::InvalidCredentials
            })?;
        if let Err(e) = verified {
            debug!(user_id = stored.id, error = %e, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(stored.id)?;
        info!(user_id = stored.id, "user logged in");
        Ok(token)
    }

    /// One discarded Argon2 pass, so a miss takes as long as a wrong password.
    async fn spend_hash(&self, password: String) {
        let hasher = self.hasher;
        let _ = tokio::task::spawn_blocking(move || hasher.hash(&password)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::memory::InMemoryUserRepository;
    use crate::config::JwtConfig;
    use crate::validator::StandardUserValidator;
    use std::time::Instant;

    fn make_issuer() -> TokenIssuer {
        TokenIssuer::new(&JwtConfig {
            secret: "test-secret".into(),
        })
    }

    fn make_service() -> (AuthService, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(
            repo.clone(),
            Arc::new(StandardUserValidator::new()),
            PasswordHasher::with_cost(1),
            make_issuer(),
        );
        (service, repo)
    }

    #[tokio::test]
    async fn sign_up_then_login_yields_token_for_same_user() {
        let (service, repo) = make_service();
        let created = service
            .sign_up(User::candidate("alice@example.com", "s3cret!"))
            .await
            .expect("sign up");
        assert_eq!(created.email, "alice@example.com");
        assert!(created.id > 0);

        let stored = repo.get_user_by_email("alice@example.com").await.unwrap();
        assert_ne!(stored.password, "s3cret!");
        assert!(stored.password.starts_with("$argon2id$"));

        let token = service
            .login(User::candidate("alice@example.com", "s3cret!"))
            .await
            .expect("login");
        let claims = make_issuer().verify(&token).expect("verify");
        assert_eq!(claims.user_id, created.id);
    }

    #[tokio::test]
    async fn invalid_email_performs_no_write() {
        let (service, repo) = make_service();
        let long = format!("{}@example.com", "a".repeat(40));
        for email in [long.as_str(), "not-an-email"] {
            let err = service
                .sign_up(User::candidate(email, "s3cret!"))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "{email}");
        }
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn password_length_boundaries_on_sign_up() {
        let (service, repo) = make_service();
        for (i, len) in [5usize, 31].into_iter().enumerate() {
            let err = service
                .sign_up(User::candidate(format!("bad{i}@example.com"), "p".repeat(len)))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)), "len {len}");
        }
        assert_eq!(repo.len().await, 0);

        for (i, len) in [6usize, 30].into_iter().enumerate() {
            service
                .sign_up(User::candidate(format!("ok{i}@example.com"), "p".repeat(len)))
                .await
                .unwrap_or_else(|e| panic!("len {len}: {e}"));
        }
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_repository_error() {
        let (service, _repo) = make_service();
        service
            .sign_up(User::candidate("dup@example.com", "s3cret!"))
            .await
            .unwrap();
        let err = service
            .sign_up(User::candidate("dup@example.com", "other-pass"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Repository(RepositoryError::Conflict)
        ));
    }

    #[tokio::test]
    async fn sign_up_storage_failure_is_propagated() {
        let (service, repo) = make_service();
        repo.set_should_fail(true);
        let err = service
            .sign_up(User::candidate("down@example.com", "s3cret!"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Repository(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn hashing_failure_is_propagated() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(
            repo.clone(),
            Arc::new(StandardUserValidator::new()),
            PasswordHasher::with_cost(0),
            make_issuer(),
        );
        let err = service
            .sign_up(User::candidate("hash@example.com", "s3cret!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Hashing(PasswordError::Hash(_))));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let (service, _repo) = make_service();
        service
            .sign_up(User::candidate("bob@example.com", "right-pass"))
            .await
            .unwrap();

        let unknown = service
            .login(User::candidate("nobody@example.com", "right-pass"))
            .await
            .unwrap_err();
        let wrong = service
            .login(User::candidate("bob@example.com", "wrong-pass"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn unknown_email_costs_as_much_as_a_hash() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(
            repo,
            Arc::new(StandardUserValidator::new()),
            PasswordHasher::new(),
            make_issuer(),
        );

        let started = Instant::now();
        PasswordHasher::new().hash("right-pass").unwrap();
        let one_hash = started.elapsed();

        let started = Instant::now();
        let err = service
            .login(User::candidate("ghost@example.com", "right-pass"))
            .await
            .unwrap_err();
        let miss = started.elapsed();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(
            miss * 4 >= one_hash,
            "miss took {miss:?}, one hash takes {one_hash:?}"
        );
    }

    #[tokio::test]
    async fn login_storage_failure_looks_like_bad_credentials() {
        let (service, repo) = make_service();
        service
            .sign_up(User::candidate("carol@example.com", "s3cret!"))
            .await
            .unwrap();
        repo.set_should_fail(true);
        let err = service
            .login(User::candidate("carol@example.com", "s3cret!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn malformed_stored_digest_rejects_login() {
        let (service, repo) = make_service();
        repo.insert_raw("legacy@example.com", "plaintext-pass").await;
        let err = service
            .login(User::candidate("legacy@example.com", "plaintext-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_applies_signup_rules() {
        let (service, repo) = make_service();
        let digest = PasswordHasher::with_cost(1).hash(&"p".repeat(31)).unwrap();
        repo.insert_raw("long@example.com", &digest).await;
        let err = service
            .login(User::candidate("long@example.com", "p".repeat(31)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn validation_message_lists_failing_fields() {
        let (service, _repo) = make_service();
        let err = service.login(User::candidate("", "")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "email: email is required; password: password is required."
        );
    }
}
