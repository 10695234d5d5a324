use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::{CreateUserPreference, UpdateUserPreference, UserPreference};

/// Sea-ORM Entity for the user_preferences table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub preference_key: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub preference_value: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserPreference {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            preference_key: model.preference_key,
            preference_value: model.preference_value,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<CreateUserPreference> for ActiveModel {
    fn from(input: CreateUserPreference) -> Self {
        ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            preference_key: Set(input.preference_key),
            preference_value: Set(input.preference_value),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

impl ActiveModel {
    pub fn replacing(id: i64, input: UpdateUserPreference) -> Self {
        ActiveModel {
            id: Unchanged(id),
            user_id: NotSet,
            preference_key: Set(input.preference_key),
            preference_value: Set(input.preference_value),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
