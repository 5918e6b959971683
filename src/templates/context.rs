use std::borrow::Cow;
use std::fmt;

use axum::http::Uri;

use crate::i18n::Localizer;
use crate::templates::FieldView;

/// The parts of the current request a page needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestInfo {
    /// Path plus query string, e.g. `/config/wan?lang=cs`.
    pub fullpath: String,
}

impl RequestInfo {
    pub fn new(fullpath: impl Into<String>) -> Self {
        Self { fullpath: fullpath.into() }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        let fullpath = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());
        Self { fullpath }
    }
}

/// Markup inserted into pages without escaping.
///
/// It can only come from string constants compiled into the binary or from
/// their translations in the server-side catalog. Never build one from
/// request data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustedMarkup(Cow<'static, str>);

impl TrustedMarkup {
    pub const fn from_static(markup: &'static str) -> Self {
        TrustedMarkup(Cow::Borrowed(markup))
    }

    /// Translation of a compiled-in constant; catalogs are trusted like the binary.
    pub fn translated(trans: &dyn Localizer, markup: &'static str) -> Self {
        TrustedMarkup(Cow::Owned(trans.trans(markup)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait CsrfTokenSource {
    fn csrf_token(&self) -> String;
}

impl<F> CsrfTokenSource for F
where
    F: Fn() -> String,
{
    fn csrf_token(&self) -> String {
        self()
    }
}

/// An ordered, read-only sequence of field descriptors to render.
pub trait ActiveFields {
    fn active_fields(&self) -> Vec<FieldView>;
}

impl ActiveFields for Vec<FieldView> {
    fn active_fields(&self) -> Vec<FieldView> {
        self.clone()
    }
}
