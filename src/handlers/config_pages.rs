use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::models::{AppState, Message};
use crate::templates::RequestInfo;
use crate::utils::form_request_data;

use super::helpers::{
    csrf_token_for, ensure_session, push_flash, render_config_page, take_flash_messages, validate_csrf, PageRender,
};

pub async fn config_page_get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let page = state.page(&slug).ok_or_else(|| AppError::PageNotFound(slug.clone()))?;
    let (jar, sid) = ensure_session(&state, jar);
    let csrf_token = csrf_token_for(&state, &sid);
    let messages = take_flash_messages(&state, &sid);
    let trans = state.localizer.as_ref();

    let mut form = page.build_form(trans, None);
    form.load_from(state.store.as_ref());

    let request = RequestInfo::from_uri(&uri);
    let html = render_config_page(&PageRender {
        pages: &state.pages,
        page,
        form: &form,
        trans,
        request: &request,
        csrf_token: &csrf_token,
        messages: &messages,
    })?;
    Ok((jar, Html(html)).into_response())
}

pub async fn config_page_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
    body: Bytes,
) -> Result<Response, AppError> {
    let page = state.page(&slug).ok_or_else(|| AppError::PageNotFound(slug.clone()))?;
    let data = form_request_data(&body);
    let sid = validate_csrf(&state, &jar, data.get("csrf_token").map(String::as_str))?;
    let trans = state.localizer.as_ref();
    let request = RequestInfo::from_uri(&uri);

    let mut form = page.build_form(trans, Some(data));
    form.load_from(state.store.as_ref());

    if form.validate(trans) {
        form.save(state.store.as_ref())?;
        tracing::info!(page = %slug, "configuration saved");
        push_flash(&state, &sid, Message::success(trans.trans("Configuration was successfully saved.")));
        return Ok(Redirect::to(&request.fullpath).into_response());
    }

    tracing::debug!(page = %slug, errors = form.errors().len(), "rejected invalid form input");
    let csrf_token = csrf_token_for(&state, &sid);
    let mut messages = take_flash_messages(&state, &sid);
    messages.push(Message::error(trans.trans("Can't save settings because of invalid form input.")));
    let html = render_config_page(&PageRender {
        pages: &state.pages,
        page,
        form: &form,
        trans,
        request: &request,
        csrf_token: &csrf_token,
        messages: &messages,
    })?;
    Ok(Html(html).into_response())
}
