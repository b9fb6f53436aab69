use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod resolver;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
