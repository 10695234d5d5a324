use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserPreferencesError, UserPreferencesResult};
use crate::models::{CreateUserPreference, UpdateUserPreference, UserPreference};
use crate::repository::UserPreferencesRepository;

/// Pass-through CRUD over [`UserPreferencesRepository`] with validation and
/// not-found mapping.
pub struct UserPreferencesService<R: UserPreferencesRepository> {
    repository: Arc<R>,
}

impl<R: UserPreferencesRepository> Clone for UserPreferencesService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserPreferencesRepository> UserPreferencesService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> UserPreferencesResult<Vec<UserPreference>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> UserPreferencesResult<UserPreference> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserPreferencesError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: i64) -> UserPreferencesResult<Vec<UserPreference>> {
        self.repository.find_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_key(&self, key: &str) -> UserPreferencesResult<Vec<UserPreference>> {
        self.repository.find_by_key(key).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_user_and_key(
        &self,
        user_id: i64,
        key: &str,
    ) -> UserPreferencesResult<Vec<UserPreference>> {
        self.repository.find_by_user_and_key(user_id, key).await
    }

    #[instrument(skip(self, input), fields(user_id = input.user_id))]
    pub async fn create(&self, input: CreateUserPreference) -> UserPreferencesResult<UserPreference> {
        input
            .validate()
            .map_err(|e| UserPreferencesError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: UpdateUserPreference,
    ) -> UserPreferencesResult<UserPreference> {
        input
            .validate()
            .map_err(|e| UserPreferencesError::Validation(e.to_string()))?;

        self.repository
            .replace(id, input)
            .await?
            .ok_or(UserPreferencesError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> UserPreferencesResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserPreferencesError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserPreferencesRepository, MockUserPreferencesRepository};

    #[tokio::test]
    async fn test_update_replaces_key_and_value() {
        let service = UserPreferencesService::new(InMemoryUserPreferencesRepository::new());
        let created = service
            .create(CreateUserPreference {
                user_id: 1,
                preference_key: "theme".into(),
                preference_value: Some("dark".into()),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateUserPreference {
                    preference_key: "colour".into(),
                    preference_value: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_id, 1);
        assert_eq!(updated.preference_key, "colour");
        assert_eq!(updated.preference_value, None);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let service = UserPreferencesService::new(InMemoryUserPreferencesRepository::new());

        assert!(matches!(
            service.get_by_id(8).await,
            Err(UserPreferencesError::NotFound(8))
        ));
        assert!(matches!(
            service.delete(8).await,
            Err(UserPreferencesError::NotFound(8))
        ));
        let update = UpdateUserPreference {
            preference_key: "k".into(),
            preference_value: None,
        };
        assert!(matches!(
            service.update(8, update).await,
            Err(UserPreferencesError::NotFound(8))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_repository() {
        let mut mock_repo = MockUserPreferencesRepository::new();
        mock_repo.expect_create().never();

        let service = UserPreferencesService::new(mock_repo);
        let result = service
            .create(CreateUserPreference {
                user_id: 1,
                preference_key: "".into(),
                preference_value: None,
            })
            .await;

        assert!(matches!(result, Err(UserPreferencesError::Validation(_))));
    }
}
