//! Authentication use-cases

use std::sync::Arc;

use tracing::{info, warn};

use super::hashing;
use crate::domain::{DomainError, DomainResult, Principal, RepositoryProvider, User};
use crate::infrastructure::{PasswordManager, TokenService};

/// Resolves email + password to a user and mints bearer tokens.
///
/// Both `/authentication/login` and `/authentication/generate_token` go
/// through [`AuthService::authenticate`], so the two endpoints cannot
/// drift apart.
pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    tokens: Arc<TokenService>,
    passwords: PasswordManager,
}

impl AuthService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        tokens: Arc<TokenService>,
        passwords: PasswordManager,
    ) -> Self {
        Self {
            repos,
            tokens,
            passwords,
        }
    }

    /// Check a password against the user's active credential.
    ///
    /// Unknown email is `NotFound`; a missing credential and a wrong
    /// password are both `Unauthorized("Invalid credentials")`.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let Some(user) = self.repos.users().find_by_email(email).await? else {
            record_failure("unknown_user");
            return Err(DomainError::not_found("User", "email", email));
        };

        let Some(credential) = self.repos.credentials().find_active_for_user(user.id).await? else {
            warn!(user_id = user.id, "Login attempt for user without an active password");
            record_failure("no_credential");
            return Err(DomainError::invalid_credentials());
        };

        let valid = hashing::verify(
            self.passwords,
            password.to_string(),
            credential.password_hash,
        )
        .await;
        if !valid {
            warn!(user_id = user.id, "Login attempt with wrong password");
            record_failure("bad_password");
            return Err(DomainError::invalid_credentials());
        }

        info!(user_id = user.id, "User authenticated");
        Ok(user)
    }

    /// Mint an access token whose subject is the user's email.
    pub fn issue_token(&self, user: &User) -> DomainResult<String> {
        self.tokens
            .create_access_token(&user.email, None)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Load the account behind a verified token.
    pub async fn current_user(&self, principal: &Principal) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_email(&principal.subject)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", &principal.subject))
    }
}

fn record_failure(reason: &'static str) {
    metrics::counter!("auth_failures_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::UserService;
    use crate::domain::CreateUserDto;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::{JwtConfig, SeaOrmRepositoryProvider};

    struct Fixture {
        auth: AuthService,
        users: UserService,
        tokens: Arc<TokenService>,
    }

    async fn fixture() -> Fixture {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        let tokens = Arc::new(TokenService::new(JwtConfig::default()).unwrap());
        let passwords = PasswordManager::new(4);
        Fixture {
            auth: AuthService::new(repos.clone(), tokens.clone(), passwords),
            users: UserService::new(repos, passwords),
            tokens,
        }
    }

    async fn register(f: &Fixture, email: &str, password: Option<&str>) -> User {
        let user = f
            .users
            .create_user(CreateUserDto {
                username: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
                full_name: None,
                is_active: true,
                is_superuser: false,
            })
            .await
            .unwrap();
        if let Some(password) = password {
            f.users.create_password(user.id, password).await.unwrap();
        }
        user
    }

    #[tokio::test]
    async fn correct_credentials_authenticate() {
        let f = fixture().await;
        let user = register(&f, "ann@example.com", Some("s3cret")).await;

        let authed = f.auth.authenticate("ann@example.com", "s3cret").await.unwrap();
        assert_eq!(authed, user);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let f = fixture().await;
        register(&f, "ann@example.com", Some("s3cret")).await;

        let err = f.auth.authenticate("ann@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(m) if m == "Invalid credentials"));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let f = fixture().await;
        let err = f.auth.authenticate("ghost@example.com", "x").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn user_without_credential_is_unauthorized() {
        let f = fixture().await;
        register(&f, "ann@example.com", None).await;

        let err = f.auth.authenticate("ann@example.com", "").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn issued_token_resolves_back_to_the_user() {
        let f = fixture().await;
        let user = register(&f, "ann@example.com", Some("s3cret")).await;

        let token = f.auth.issue_token(&user).unwrap();
        let principal = f.tokens.verify_access_token(&token, || ()).unwrap();
        assert_eq!(principal.subject, "ann@example.com");

        let me = f.auth.current_user(&principal).await.unwrap();
        assert_eq!(me.id, user.id);
    }

    #[tokio::test]
    async fn current_user_for_deleted_account_is_not_found() {
        let f = fixture().await;
        let err = f
            .auth
            .current_user(&Principal::new("gone@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
