use axum::Router;

use crate::state::AppState;

pub mod compute;
pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::stats_routes()
}
