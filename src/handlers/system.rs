use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
};

use crate::errors::AppError;
use crate::models::AppState;

// Embed the stylesheet in the binary
const STYLESHEET: &str = include_str!("../../static/foris.css");

pub async fn root_get(State(state): State<AppState>) -> Result<Response, AppError> {
    let slug = state.first_page_slug().ok_or_else(|| AppError::PageNotFound(String::new()))?;
    Ok(Redirect::to(&format!("/config/{}", slug)).into_response())
}

pub async fn stylesheet_get() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css"), (CACHE_CONTROL, "public, max-age=3600")], STYLESHEET)
}
