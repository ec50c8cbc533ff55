pub mod health;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::board::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_list_jobs))
        .route("/job/:job", get(handlers::handle_job_detail))
        .route("/apply/:job", get(handlers::handle_apply))
        .fallback_service(static_files)
        .with_state(state)
}
