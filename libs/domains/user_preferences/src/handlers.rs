//! HTTP handlers for the user preferences API

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{
    IdPath, PathParams, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserPreferencesResult;
use crate::models::{CreateUserPreference, UpdateUserPreference, UserPreference};
use crate::repository::UserPreferencesRepository;
use crate::service::UserPreferencesService;

pub const TAG: &str = "User Preferences";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_preferences,
        create_preference,
        get_preference,
        update_preference,
        delete_preference,
        list_by_user,
        list_by_key,
        list_by_user_and_key,
    ),
    components(
        schemas(UserPreference, CreateUserPreference, UpdateUserPreference),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Per-user key/value settings")
    )
)]
pub struct ApiDoc;

pub fn router<R: UserPreferencesRepository + 'static>(service: UserPreferencesService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_preferences).post(create_preference))
        .route("/user/{user_id}", get(list_by_user))
        .route("/user/{user_id}/key/{key}", get(list_by_user_and_key))
        .route("/key/{key}", get(list_by_key))
        .route(
            "/{id}",
            get(get_preference)
                .put(update_preference)
                .delete(delete_preference),
        )
        .with_state(shared_service)
}

/// List all preferences
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All preferences", body = Vec<UserPreference>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_preferences<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
) -> UserPreferencesResult<Json<Vec<UserPreference>>> {
    Ok(Json(service.list_all().await?))
}

/// Create a preference
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUserPreference,
    responses(
        (status = 201, description = "Preference created", body = UserPreference),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_preference<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUserPreference>,
) -> UserPreferencesResult<impl IntoResponse> {
    let preference = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(preference)))
}

/// Get a preference by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Preference ID")),
    responses(
        (status = 200, description = "Preference found", body = UserPreference),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_preference<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    IdPath(id): IdPath,
) -> UserPreferencesResult<Json<UserPreference>> {
    Ok(Json(service.get_by_id(id).await?))
}

/// Replace a preference's key and value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Preference ID")),
    request_body = UpdateUserPreference,
    responses(
        (status = 200, description = "Preference updated", body = UserPreference),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_preference<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUserPreference>,
) -> UserPreferencesResult<Json<UserPreference>> {
    Ok(Json(service.update(id, input).await?))
}

/// Delete a preference
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Preference ID")),
    responses(
        (status = 204, description = "Preference deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_preference<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    IdPath(id): IdPath,
) -> UserPreferencesResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Preferences of one user
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = TAG,
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's preferences", body = Vec<UserPreference>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_user<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    IdPath(user_id): IdPath,
) -> UserPreferencesResult<Json<Vec<UserPreference>>> {
    Ok(Json(service.list_by_user(user_id).await?))
}

/// Preferences with a given key, across users
#[utoipa::path(
    get,
    path = "/key/{key}",
    tag = TAG,
    params(("key" = String, Path, description = "Preference key")),
    responses(
        (status = 200, description = "Preferences with this key", body = Vec<UserPreference>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_key<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    PathParams(key): PathParams<String>,
) -> UserPreferencesResult<Json<Vec<UserPreference>>> {
    Ok(Json(service.list_by_key(&key).await?))
}

/// One user's preferences with a given key
#[utoipa::path(
    get,
    path = "/user/{user_id}/key/{key}",
    tag = TAG,
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("key" = String, Path, description = "Preference key")
    ),
    responses(
        (status = 200, description = "Matching preferences", body = Vec<UserPreference>),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_user_and_key<R: UserPreferencesRepository>(
    State(service): State<Arc<UserPreferencesService<R>>>,
    PathParams((user_id, key)): PathParams<(i64, String)>,
) -> UserPreferencesResult<Json<Vec<UserPreference>>> {
    Ok(Json(service.list_by_user_and_key(user_id, &key).await?))
}
