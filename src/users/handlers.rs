use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{is_valid_email, UserCreate, UserOut, UserUpdate};
use crate::users::services;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", put(add_user).get(get_all_users))
        .route(
            "/users/:id",
            get(get_user_by_id)
                .patch(edit_user_by_id)
                .delete(delete_user_by_id),
        )
}

#[instrument(skip(state, payload))]
pub async fn add_user(
    State(state): State<AppState>,
    Json(mut payload): Json<UserCreate>,
) -> Result<Json<UserOut>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let user = services::register(
        state.store.as_ref(),
        &payload.name,
        &payload.email,
        &payload.password,
    )
    .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserOut>>, ApiError> {
    let users = services::list_all(state.store.as_ref()).await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserOut>, ApiError> {
    let user = services::get_by_id(state.store.as_ref(), id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn edit_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UserUpdate>,
) -> Result<Json<UserOut>, ApiError> {
    if let Some(email) = payload.email.take() {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            warn!(%email, "invalid email");
            return Err(ApiError::Validation("Invalid email".into()));
        }
        payload.email = Some(email);
    }

    let user = services::update_by_id(state.store.as_ref(), id, payload).await?;
    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    services::delete_by_id(state.store.as_ref(), id).await?;
    info!(user_id = id, "user deleted");
    Ok(StatusCode::OK)
}
