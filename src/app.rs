use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/log", post(handlers::add_log_form))
        .route("/api/logs", get(handlers::list_logs).post(handlers::add_log))
        .route("/api/logs/:id", delete(handlers::delete_log))
        .route("/api/month", get(handlers::get_month))
        .route("/api/day", get(handlers::get_day))
        .with_state(state)
}
