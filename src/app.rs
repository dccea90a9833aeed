use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/habits", get(handlers::list_habits).post(handlers::add_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_completion))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/week", get(handlers::get_week))
        .route("/api/colors", get(handlers::get_colors))
        .with_state(state)
}
