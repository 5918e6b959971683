use crate::forms::validators::Validator;
use crate::forms::{
    bool_value, text_value, CallbackOutcome, Choice, Field, FieldKind, FieldValue, ForisForm, FormData, RequestData,
    Section,
};
use crate::i18n::Localizer;
use crate::pages::ConfigPage;
use crate::store::ConfigUpdate;
use crate::templates::TrustedMarkup;

pub struct DnsPage;

impl ConfigPage for DnsPage {
    fn slug(&self) -> &'static str {
        "dns"
    }

    fn title(&self) -> &'static str {
        "DNS"
    }

    fn description(&self, trans: &dyn Localizer) -> TrustedMarkup {
        TrustedMarkup::translated(
            trans,
            "The router uses its own validating resolver. You can forward queries to the DNS servers \
             of your provider, or let the router resolve them directly. Disabling <strong>DNSSEC</strong> \
             is only useful when your provider breaks it.",
        )
    }

    fn build_form(&self, trans: &dyn Localizer, request_data: Option<RequestData>) -> ForisForm {
        let mut form = ForisForm::new("dns", request_data);
        form.add_section(Section::new("dns", trans.trans("DNS")))
            .add_field(
                Field::new(
                    FieldKind::Radio(vec![
                        Choice::new("kresd", trans.trans("Knot Resolver")),
                        Choice::new("unbound", trans.trans("Unbound")),
                    ]),
                    "resolver",
                    trans.trans("Resolver"),
                )
                .config_path("resolver.common.prefered_resolver")
                .default_value(FieldValue::text("kresd")),
            )
            .add_field(
                Field::new(FieldKind::Checkbox, "forwarding_enabled", trans.trans("Use forwarding"))
                    .config_path("resolver.common.forward_upstream")
                    .default_value(FieldValue::Bool(true)),
            )
            .add_field(
                Field::new(FieldKind::Checkbox, "dnssec_disabled", trans.trans("Disable DNSSEC"))
                    .config_path("resolver.common.ignore_root_key")
                    .default_value(FieldValue::Bool(false)),
            )
            .add_field(
                Field::new(FieldKind::Textbox, "local_domain", trans.trans("Local domain"))
                    .config_path("resolver.common.domain")
                    .validator(Validator::Domain)
                    .validator(Validator::LenRange(1, 63))
                    .hint(trans.trans("Domain appended to the names of devices in your network.")),
            );

        form.add_callback(dns_updates);
        form
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}

fn dns_updates(data: &FormData) -> CallbackOutcome {
    let mut updates = vec![
        ConfigUpdate::set("resolver.common.prefered_resolver", text_value(data, "resolver")),
        ConfigUpdate::set("resolver.common.forward_upstream", flag(bool_value(data, "forwarding_enabled"))),
        ConfigUpdate::set("resolver.common.ignore_root_key", flag(bool_value(data, "dnssec_disabled"))),
    ];
    match text_value(data, "local_domain") {
        domain if domain.is_empty() => updates.push(ConfigUpdate::delete("resolver.common.domain")),
        domain => updates.push(ConfigUpdate::set("resolver.common.domain", domain)),
    }
    CallbackOutcome::EditConfig(updates)
}
