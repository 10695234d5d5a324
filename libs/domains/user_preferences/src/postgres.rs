use async_trait::async_trait;
use database::{BaseRepository, is_foreign_key_violation};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::{
    entity::{self, Column},
    error::{UserPreferencesError, UserPreferencesResult},
    models::{CreateUserPreference, UpdateUserPreference, UserPreference},
    repository::UserPreferencesRepository,
};

#[derive(Clone)]
pub struct PgUserPreferencesRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserPreferencesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn list(&self, query: Select<entity::Entity>) -> UserPreferencesResult<Vec<UserPreference>> {
        let models = query.order_by_asc(Column::Id).all(self.base.db()).await?;
        Ok(models.into_iter().map(UserPreference::from).collect())
    }
}

#[async_trait]
impl UserPreferencesRepository for PgUserPreferencesRepository {
    async fn find_all(&self) -> UserPreferencesResult<Vec<UserPreference>> {
        self.list(entity::Entity::find()).await
    }

    async fn find_by_id(&self, id: i64) -> UserPreferencesResult<Option<UserPreference>> {
        Ok(self.base.find_by_id(id).await?.map(UserPreference::from))
    }

    async fn find_by_user(&self, user_id: i64) -> UserPreferencesResult<Vec<UserPreference>> {
        self.list(entity::Entity::find().filter(Column::UserId.eq(user_id)))
            .await
    }

    async fn find_by_key(&self, key: &str) -> UserPreferencesResult<Vec<UserPreference>> {
        self.list(entity::Entity::find().filter(Column::PreferenceKey.eq(key)))
            .await
    }

    async fn find_by_user_and_key(
        &self,
        user_id: i64,
        key: &str,
    ) -> UserPreferencesResult<Vec<UserPreference>> {
        self.list(
            entity::Entity::find()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::PreferenceKey.eq(key)),
        )
        .await
    }

    async fn create(&self, input: CreateUserPreference) -> UserPreferencesResult<UserPreference> {
        let user_id = input.user_id;
        let active_model: entity::ActiveModel = input.into();

        let model = self.base.insert(active_model).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                UserPreferencesError::UnknownUser(user_id)
            } else {
                e.into()
            }
        })?;

        tracing::info!(preference_id = model.id, user_id, "Created user preference");
        Ok(model.into())
    }

    async fn replace(
        &self,
        id: i64,
        input: UpdateUserPreference,
    ) -> UserPreferencesResult<Option<UserPreference>> {
        match self.base.update(entity::ActiveModel::replacing(id, input)).await {
            Ok(model) => {
                tracing::info!(preference_id = id, "Updated user preference");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> UserPreferencesResult<bool> {
        let deleted = self.base.delete_by_id(id).await? > 0;
        if deleted {
            tracing::info!(preference_id = id, "Deleted user preference");
        }
        Ok(deleted)
    }
}
