use std::sync::{MutexGuard, PoisonError};
use std::time::Instant;

use askama::Template;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::errors::AppError;
use crate::forms::ForisForm;
use crate::i18n::Localizer;
use crate::models::{AppState, Message, SessionStore};
use crate::pages::ConfigPage;
use crate::templates::{
    render_config_form, ConfigBaseTemplate, FieldTemplatePartial, FormContext, NavItem, RequestInfo,
};

pub const SESSION_COOKIE: &str = "session_id";

fn sessions(state: &AppState) -> MutexGuard<'_, SessionStore> {
    state.sessions.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Returns the live session of the request, starting a new one if needed.
pub fn ensure_session(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
    let now = Instant::now();
    if let Some(sid) = session_id_from_jar(&jar) {
        if sessions(state).touch(&sid, now) {
            return (jar, sid);
        }
    }
    let sid = sessions(state).start(now);
    tracing::debug!("started new session");
    let mut cookie = Cookie::new(SESSION_COOKIE, sid.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    (jar.add(cookie), sid)
}

/// CSRF token of the session, issued on first use and reused afterwards.
pub fn csrf_token_for(state: &AppState, sid: &str) -> String {
    sessions(state).csrf_token(sid, Instant::now())
}

/// Checks the submitted token against the session and returns the session id.
pub fn validate_csrf(state: &AppState, jar: &CookieJar, submitted: Option<&str>) -> Result<String, AppError> {
    let sid = session_id_from_jar(jar);
    let valid = match (&sid, submitted) {
        (Some(sid), Some(token)) => sessions(state).token_matches(sid, token, Instant::now()),
        _ => false,
    };
    match sid {
        Some(sid) if valid => Ok(sid),
        _ => {
            tracing::warn!(has_session = sid.is_some(), "rejected form submission with invalid CSRF token");
            Err(AppError::InvalidCsrfToken)
        }
    }
}

pub fn take_flash_messages(state: &AppState, sid: &str) -> Vec<Message> {
    sessions(state).take_flash(sid)
}

pub fn push_flash(state: &AppState, sid: &str, message: Message) {
    sessions(state).push_flash(sid, message);
}

pub fn nav_items(pages: &[Box<dyn ConfigPage>], current: &str, trans: &dyn Localizer) -> Vec<NavItem> {
    pages
        .iter()
        .map(|p| NavItem {
            href: format!("/config/{}", p.slug()),
            title: trans.trans(p.title()),
            active: p.slug() == current,
        })
        .collect()
}

/// Everything needed to turn a page form into a complete HTML document.
pub struct PageRender<'a> {
    pub pages: &'a [Box<dyn ConfigPage>],
    pub page: &'a dyn ConfigPage,
    pub form: &'a ForisForm,
    pub trans: &'a dyn Localizer,
    pub request: &'a RequestInfo,
    pub csrf_token: &'a str,
    pub messages: &'a [Message],
}

pub fn render_config_page(r: &PageRender<'_>) -> Result<String, AppError> {
    let description = r.page.description(r.trans);
    let ctx = FormContext { request: r.request, description: &description, form: r.form, messages: r.messages };
    let token = || r.csrf_token.to_string();
    let body = render_config_form(&ctx, &token, r.trans, &FieldTemplatePartial)?;
    let html = ConfigBaseTemplate {
        lang: r.trans.lang(),
        title: r.trans.trans(r.page.title()),
        nav: nav_items(r.pages, r.page.slug(), r.trans),
        body,
    }
    .render()?;
    Ok(html)
}
