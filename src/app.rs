use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entry/add", post(handlers::add_entry))
        .route("/calculate", post(handlers::calculate))
        .route("/clear", post(handlers::clear))
        .route("/date", post(handlers::change_date))
        .route("/theme", post(handlers::toggle_theme))
        .route("/api/state", get(handlers::get_state))
        .route("/api/entry", post(handlers::api_add_entry))
        .route("/api/calculate", post(handlers::api_calculate))
        .route("/api/clear", post(handlers::api_clear))
        .route("/api/date", post(handlers::api_change_date))
        .route("/api/day/:date", get(handlers::get_day))
        .with_state(state)
}
