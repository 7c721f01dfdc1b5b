//! Repository traits for the domain layer

use super::blog::BlogRepository;
use super::credential::CredentialRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("ann@example.com").await?;
///     let cred = repos.credentials().find_active_for_user(user.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn blogs(&self) -> &dyn BlogRepository;
    fn credentials(&self) -> &dyn CredentialRepository;
}
