use askama::Template;

use crate::i18n::Localizer;
use crate::models::Message;
use crate::templates::{ActiveFields, CsrfTokenSource, FieldPartial, MessagesTemplate, RequestInfo, TrustedMarkup};

#[derive(Template)]
#[template(path = "config/form.html")]
pub struct ConfigFormTemplate<'a> {
    pub messages: String,
    pub description: &'a str,
    pub action: &'a str,
    pub csrf_token: String,
    pub fields: Vec<String>,
    pub save_label: String,
    pub discard_label: String,
}

/// View model of a configuration form page.
pub struct FormContext<'a> {
    pub request: &'a RequestInfo,
    pub description: &'a TrustedMarkup,
    pub form: &'a dyn ActiveFields,
    pub messages: &'a [Message],
}

/// Renders the configuration form body.
///
/// Each active field goes through `partial` exactly once, in order. The
/// CSRF token is requested once per call. `description` is inserted
/// verbatim; everything else is escaped. Errors from the partial or the
/// template engine are returned unchanged.
pub fn render_config_form(
    ctx: &FormContext<'_>,
    csrf: &dyn CsrfTokenSource,
    trans: &dyn Localizer,
    partial: &dyn FieldPartial,
) -> askama::Result<String> {
    let fields = ctx
        .form
        .active_fields()
        .iter()
        .map(|field| partial.render_field(field))
        .collect::<askama::Result<Vec<_>>>()?;
    let messages = MessagesTemplate { messages: ctx.messages }.render()?;

    ConfigFormTemplate {
        messages,
        description: ctx.description.as_str(),
        action: &ctx.request.fullpath,
        csrf_token: csrf.csrf_token(),
        fields,
        save_label: trans.trans("Save changes"),
        discard_label: trans.trans("Discard changes"),
    }
    .render()
}
