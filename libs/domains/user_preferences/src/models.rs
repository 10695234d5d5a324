use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A single key/value setting belonging to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub id: i64,
    pub user_id: i64,
    pub preference_key: String,
    pub preference_value: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a preference
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPreference {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(
        length(min = 1, max = 255),
        custom(function = "not_blank", message = "preferenceKey must not be blank")
    )]
    pub preference_key: String,
    #[serde(default)]
    pub preference_value: Option<String>,
}

/// DTO for replacing a preference's key and value. The owning user never changes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPreference {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "not_blank", message = "preferenceKey must not be blank")
    )]
    pub preference_key: String,
    #[serde(default)]
    pub preference_value: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
