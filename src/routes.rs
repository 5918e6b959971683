use axum::http::header::X_FRAME_OPTIONS;
use axum::http::HeaderValue;
use axum::{routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_get))
        .route("/static/foris.css", get(handlers::stylesheet_get))
        .route("/config/:page", get(handlers::config_page_get).post(handlers::config_page_post))
        .layer(SetResponseHeaderLayer::if_not_present(X_FRAME_OPTIONS, HeaderValue::from_static("DENY")))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
