//! Maps a Telegram user id to the viewer identity used for visibility.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::Viewer;
use crate::error::DomainError;
use crate::repositories::{RoleRepository, TelegramUserRepository};

pub struct ViewerResolver<U: TelegramUserRepository + ?Sized, R: RoleRepository + ?Sized> {
    user_repo: Arc<U>,
    role_repo: Arc<R>,
}

impl<U, R> ViewerResolver<U, R>
where
    U: TelegramUserRepository + ?Sized,
    R: RoleRepository + ?Sized,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self { user_repo, role_repo }
    }

    /// Resolve the viewer for `telegram_id`. Read-only; unknown, inactive and
    /// stale users all resolve to `Guest`.
    pub async fn resolve(&self, telegram_id: i64) -> Result<Viewer, DomainError> {
        let Some(user) = self.user_repo.find_by_telegram_id(telegram_id).await? else {
            debug!("Telegram user {} not registered, viewing as guest", telegram_id);
            return Ok(Viewer::Guest);
        };

        if !user.active {
            debug!("Telegram user {} is inactive, viewing as guest", telegram_id);
            return Ok(Viewer::Guest);
        }

        if let Some(role_id) = user.role_id {
            return match self.role_repo.get_role(&role_id).await? {
                Some(role) => Ok(Viewer::Role(role.id)),
                None => {
                    warn!("Telegram user {} references missing role {}", telegram_id, role_id);
                    Ok(Viewer::Guest)
                }
            };
        }

        if user.has_confirmed_email() {
            // Confirmed employees without an explicit role get the minimal one
            return Ok(match self.role_repo.find_minimal().await? {
                Some(role) => Viewer::Role(role.id),
                None => Viewer::Guest,
            });
        }

        Ok(Viewer::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, TelegramUser};
    use crate::repositories::{MockRoleRepository, MockTelegramUserRepository};
    use mockall::predicate::*;
    use uuid::Uuid;

    const TG_ID: i64 = 424242;

    fn user() -> TelegramUser {
        TelegramUser::new(TG_ID, Some("ivanov".to_string()))
    }

    fn resolver(
        user: Option<TelegramUser>,
        role_repo: MockRoleRepository,
    ) -> ViewerResolver<MockTelegramUserRepository, MockRoleRepository> {
        let mut user_repo = MockTelegramUserRepository::new();
        user_repo
            .expect_find_by_telegram_id()
            .with(eq(TG_ID))
            .returning(move |_| Ok(user.clone()));
        ViewerResolver::new(Arc::new(user_repo), Arc::new(role_repo))
    }

    #[tokio::test]
    async fn test_unknown_user_is_guest() {
        let r = resolver(None, MockRoleRepository::new());
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Guest);
    }

    #[tokio::test]
    async fn test_inactive_user_is_guest() {
        let mut u = user();
        u.role_id = Some(Uuid::new_v4());
        u.active = false;
        let r = resolver(Some(u), MockRoleRepository::new());
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Guest);
    }

    #[tokio::test]
    async fn test_assigned_role() {
        let role = Role::new("Сотрудник".to_string(), false).unwrap();
        let mut u = user();
        u.role_id = Some(role.id);

        let mut roles = MockRoleRepository::new();
        let found = role.clone();
        roles.expect_get_role().returning(move |_| Ok(Some(found.clone())));

        let r = resolver(Some(u), roles);
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Role(role.id));
    }

    #[tokio::test]
    async fn test_deleted_role_is_guest() {
        let mut u = user();
        u.role_id = Some(Uuid::new_v4());

        let mut roles = MockRoleRepository::new();
        roles.expect_get_role().returning(|_| Ok(None));

        let r = resolver(Some(u), roles);
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Guest);
    }

    #[tokio::test]
    async fn test_confirmed_email_gets_minimal_role() {
        let minimal = Role::new("Кандидат".to_string(), true).unwrap();
        let mut u = user();
        u.email_id = Some(Uuid::new_v4());

        let mut roles = MockRoleRepository::new();
        let found = minimal.clone();
        roles.expect_find_minimal().times(1).returning(move || Ok(Some(found.clone())));

        let r = resolver(Some(u), roles);
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Role(minimal.id));
    }

    #[tokio::test]
    async fn test_no_minimal_role_configured_is_guest() {
        let mut u = user();
        u.email_id = Some(Uuid::new_v4());

        let mut roles = MockRoleRepository::new();
        roles.expect_find_minimal().returning(|| Ok(None));

        let r = resolver(Some(u), roles);
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Guest);
    }

    #[tokio::test]
    async fn test_unconfirmed_user_is_guest() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_minimal().never();

        let r = resolver(Some(user()), roles);
        assert_eq!(r.resolve(TG_ID).await.unwrap(), Viewer::Guest);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut user_repo = MockTelegramUserRepository::new();
        user_repo
            .expect_find_by_telegram_id()
            .returning(|_| Err(DomainError::DatabaseError("timeout".to_string())));
        let r = ViewerResolver::new(Arc::new(user_repo), Arc::new(MockRoleRepository::new()));

        assert!(r.resolve(TG_ID).await.is_err());
    }
}
