use crate::forms::{ForisForm, RequestData};
use crate::i18n::Localizer;
use crate::templates::TrustedMarkup;

pub mod dns;
pub mod lan;
pub mod wan;

pub use dns::DnsPage;
pub use lan::LanPage;
pub use wan::WanPage;

/// A page of the configuration menu.
pub trait ConfigPage: Send + Sync {
    /// URL segment under `/config/`.
    fn slug(&self) -> &'static str;

    /// Untranslated menu and heading title.
    fn title(&self) -> &'static str;

    fn description(&self, trans: &dyn Localizer) -> TrustedMarkup;

    /// Builds the page form; `request_data` is `Some` for submissions.
    fn build_form(&self, trans: &dyn Localizer, request_data: Option<RequestData>) -> ForisForm;
}

/// All configuration pages in menu order.
pub fn registry() -> Vec<Box<dyn ConfigPage>> {
    vec![Box::new(WanPage), Box::new(LanPage), Box::new(DnsPage)]
}
