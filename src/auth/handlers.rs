use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::auth::dto::LoginRequest;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::{is_valid_email, UserOut};
use crate::users::services;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<UserOut>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let user = services::login(state.store.as_ref(), &payload.email, &payload.password).await?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(user.into()))
}
