use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserPreferencesError, UserPreferencesResult};
use crate::models::{CreateUserPreference, UpdateUserPreference, UserPreference};

/// Repository trait for user preference persistence
///
/// Lists are returned in ascending `id` order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesRepository: Send + Sync {
    async fn find_all(&self) -> UserPreferencesResult<Vec<UserPreference>>;

    async fn find_by_id(&self, id: i64) -> UserPreferencesResult<Option<UserPreference>>;

    async fn find_by_user(&self, user_id: i64) -> UserPreferencesResult<Vec<UserPreference>>;

    async fn find_by_key(&self, key: &str) -> UserPreferencesResult<Vec<UserPreference>>;

    async fn find_by_user_and_key(
        &self,
        user_id: i64,
        key: &str,
    ) -> UserPreferencesResult<Vec<UserPreference>>;

    /// Fails with `UnknownUser` when `user_id` has no row in `users`
    async fn create(&self, input: CreateUserPreference) -> UserPreferencesResult<UserPreference>;

    /// `None` when no row has this id
    async fn replace(
        &self,
        id: i64,
        input: UpdateUserPreference,
    ) -> UserPreferencesResult<Option<UserPreference>>;

    async fn delete(&self, id: i64) -> UserPreferencesResult<bool>;
}

/// In-memory implementation (for development/testing)
///
/// With [`with_known_users`](Self::with_known_users) it rejects unknown user ids
/// the way the foreign key does; otherwise any id is accepted.
#[derive(Debug, Clone)]
pub struct InMemoryUserPreferencesRepository {
    preferences: Arc<RwLock<BTreeMap<i64, UserPreference>>>,
    known_users: Option<Arc<BTreeSet<i64>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryUserPreferencesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserPreferencesRepository {
    pub fn new() -> Self {
        Self {
            preferences: Arc::new(RwLock::new(BTreeMap::new())),
            known_users: None,
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn with_known_users(users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            known_users: Some(Arc::new(users.into_iter().collect())),
            ..Self::new()
        }
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<UserPreference>
    where
        F: Fn(&UserPreference) -> bool,
    {
        let preferences = self.preferences.read().await;
        preferences
            .values()
            .filter(|p| predicate(*p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserPreferencesRepository for InMemoryUserPreferencesRepository {
    async fn find_all(&self) -> UserPreferencesResult<Vec<UserPreference>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> UserPreferencesResult<Option<UserPreference>> {
        let preferences = self.preferences.read().await;
        Ok(preferences.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> UserPreferencesResult<Vec<UserPreference>> {
        Ok(self.filtered(|p| p.user_id == user_id).await)
    }

    async fn find_by_key(&self, key: &str) -> UserPreferencesResult<Vec<UserPreference>> {
        Ok(self.filtered(|p| p.preference_key == key).await)
    }

    async fn find_by_user_and_key(
        &self,
        user_id: i64,
        key: &str,
    ) -> UserPreferencesResult<Vec<UserPreference>> {
        Ok(self
            .filtered(|p| p.user_id == user_id && p.preference_key == key)
            .await)
    }

    async fn create(&self, input: CreateUserPreference) -> UserPreferencesResult<UserPreference> {
        if let Some(users) = &self.known_users {
            if !users.contains(&input.user_id) {
                return Err(UserPreferencesError::UnknownUser(input.user_id));
            }
        }

        let now = Utc::now();
        let preference = UserPreference {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: input.user_id,
            preference_key: input.preference_key,
            preference_value: input.preference_value,
            created_at: now,
            updated_at: now,
        };

        let mut preferences = self.preferences.write().await;
        preferences.insert(preference.id, preference.clone());

        tracing::info!(preference_id = preference.id, user_id = preference.user_id, "Created user preference");
        Ok(preference)
    }

    async fn replace(
        &self,
        id: i64,
        input: UpdateUserPreference,
    ) -> UserPreferencesResult<Option<UserPreference>> {
        let mut preferences = self.preferences.write().await;

        let Some(preference) = preferences.get_mut(&id) else {
            return Ok(None);
        };

        preference.preference_key = input.preference_key;
        preference.preference_value = input.preference_value;
        preference.updated_at = Utc::now();

        tracing::info!(preference_id = id, "Updated user preference");
        Ok(Some(preference.clone()))
    }

    async fn delete(&self, id: i64) -> UserPreferencesResult<bool> {
        let mut preferences = self.preferences.write().await;
        let removed = preferences.remove(&id).is_some();
        if removed {
            tracing::info!(preference_id = id, "Deleted user preference");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pref(user_id: i64, key: &str) -> CreateUserPreference {
        CreateUserPreference {
            user_id,
            preference_key: key.to_string(),
            preference_value: Some("v".to_string()),
        }
    }

    #[tokio::test]
    async fn test_known_users_enforced() {
        let repo = InMemoryUserPreferencesRepository::with_known_users([1, 2]);

        assert!(repo.create(pref(1, "theme")).await.is_ok());
        let err = repo.create(pref(3, "theme")).await.unwrap_err();
        assert!(matches!(err, UserPreferencesError::UnknownUser(3)));
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryUserPreferencesRepository::new();
        repo.create(pref(1, "theme")).await.unwrap();
        repo.create(pref(1, "lang")).await.unwrap();
        repo.create(pref(2, "theme")).await.unwrap();

        assert_eq!(repo.find_by_user(1).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_key("theme").await.unwrap().len(), 2);
        assert_eq!(repo.find_by_user_and_key(2, "theme").await.unwrap().len(), 1);
        assert!(repo.find_by_user_and_key(2, "lang").await.unwrap().is_empty());
    }
}
