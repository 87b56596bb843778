use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod password;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
