//! Integration tests for the user preferences repository against PostgreSQL.
//!
//! Run with `cargo test -p domain_user_preferences -- --ignored` (requires Docker).

use domain_user_preferences::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_lookup() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("prefs_create_and_lookup");
    let user_id = db.create_test_user(&builder.username("owner")).await;
    let repo = PgUserPreferencesRepository::new(db.connection());

    let created = repo
        .create(CreateUserPreference {
            user_id,
            preference_key: "theme".into(),
            preference_value: Some("dark".into()),
        })
        .await
        .unwrap();

    let fetched = assert_some(repo.find_by_id(created.id).await.unwrap(), "preference");
    assert_eq!(fetched.user_id, user_id);

    assert_eq!(repo.find_by_user(user_id).await.unwrap().len(), 1);
    assert_eq!(repo.find_by_key("theme").await.unwrap().len(), 1);
    assert_eq!(
        repo.find_by_user_and_key(user_id, "theme").await.unwrap().len(),
        1
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unknown_user_is_rejected_by_foreign_key() {
    let db = TestDatabase::new().await;
    let repo = PgUserPreferencesRepository::new(db.connection());

    let err = repo
        .create(CreateUserPreference {
            user_id: 424242,
            preference_key: "theme".into(),
            preference_value: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, UserPreferencesError::UnknownUser(424242)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_replace_keeps_owner_and_bumps_updated_at() {
    let db = TestDatabase::new().await;
    let user_id = db.create_test_user("replace_owner").await;
    let repo = PgUserPreferencesRepository::new(db.connection());

    let created = repo
        .create(CreateUserPreference {
            user_id,
            preference_key: "lang".into(),
            preference_value: Some("en".into()),
        })
        .await
        .unwrap();

    let replaced = repo
        .replace(
            created.id,
            UpdateUserPreference {
                preference_key: "language".into(),
                preference_value: Some("de".into()),
            },
        )
        .await
        .unwrap();
    let replaced = assert_some(replaced, "row should be updated");

    assert_eq!(replaced.user_id, user_id);
    assert_eq!(replaced.preference_key, "language");
    assert!(replaced.updated_at >= created.updated_at);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
}
