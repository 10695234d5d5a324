use axum::Router;
use domain_user_preferences::{PgUserPreferencesRepository, UserPreferencesService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserPreferencesRepository::new(state.db.clone());
    handlers::router(UserPreferencesService::new(repository))
}
