use crate::forms::validators::Validator;
use crate::forms::{text_value, CallbackOutcome, Choice, Field, FieldKind, FieldValue, ForisForm, FormData, RequestData, Section};
use crate::i18n::Localizer;
use crate::pages::ConfigPage;
use crate::store::ConfigUpdate;
use crate::templates::TrustedMarkup;

const STATIC_OPTIONS: [&str; 3] = ["ipaddr", "netmask", "gateway"];
const PPPOE_OPTIONS: [&str; 2] = ["username", "password"];

pub struct WanPage;

impl ConfigPage for WanPage {
    fn slug(&self) -> &'static str {
        "wan"
    }

    fn title(&self) -> &'static str {
        "WAN"
    }

    fn description(&self, trans: &dyn Localizer) -> TrustedMarkup {
        TrustedMarkup::translated(
            trans,
            "Here you specify your WAN port settings. Usually, you can leave these options untouched \
             unless instructed otherwise by your internet service provider. When a cable or DSL modem \
             connects your router to the network, it is usually <strong>not necessary</strong> to change \
             this setting.",
        )
    }

    fn build_form(&self, trans: &dyn Localizer, request_data: Option<RequestData>) -> ForisForm {
        let mut form = ForisForm::new("wan", request_data);
        let wan = form.add_section(Section::new("set_wan", trans.trans("WAN")));
        let is_static = || FieldValue::text("static");
        let is_pppoe = || FieldValue::text("pppoe");

        wan.add_field(
            Field::new(
                FieldKind::Dropdown(vec![
                    Choice::new("dhcp", trans.trans("DHCP (automatic configuration)")),
                    Choice::new("static", trans.trans("Static IP address (manual configuration)")),
                    Choice::new("pppoe", trans.trans("PPPoE (for DSL bridges, Modem Turris, etc.)")),
                ]),
                "proto",
                trans.trans("IPv4 protocol"),
            )
            .config_path("network.wan.proto")
            .default_value(FieldValue::text("dhcp")),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "ipaddr", trans.trans("IP address"))
                .config_path("network.wan.ipaddr")
                .required()
                .validator(Validator::IPv4)
                .requires_value("proto", is_static()),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "netmask", trans.trans("Network mask"))
                .config_path("network.wan.netmask")
                .required()
                .validator(Validator::IPv4)
                .requires_value("proto", is_static()),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "gateway", trans.trans("Gateway"))
                .config_path("network.wan.gateway")
                .validator(Validator::IPv4)
                .requires_value("proto", is_static()),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "username", trans.trans("PAP/CHAP username"))
                .config_path("network.wan.username")
                .required()
                .requires_value("proto", is_pppoe()),
        )
        .add_field(
            Field::new(FieldKind::Password, "password", trans.trans("PAP/CHAP password"))
                .config_path("network.wan.password")
                .required()
                .requires_value("proto", is_pppoe()),
        );

        form.add_callback(wan_updates);
        form
    }
}

fn wan_updates(data: &FormData) -> CallbackOutcome {
    let proto = text_value(data, "proto");
    let mut updates = vec![ConfigUpdate::set("network.wan.proto", proto.as_str())];
    let (keep, cleared): (&[&str], Vec<&str>) = match proto.as_str() {
        "static" => (&STATIC_OPTIONS[..], PPPOE_OPTIONS.to_vec()),
        "pppoe" => (&PPPOE_OPTIONS[..], STATIC_OPTIONS.to_vec()),
        _ => (&[][..], STATIC_OPTIONS.iter().chain(PPPOE_OPTIONS.iter()).copied().collect()),
    };
    for option in keep {
        let path = format!("network.wan.{}", option);
        match text_value(data, option) {
            value if value.is_empty() => updates.push(ConfigUpdate::delete(path)),
            value => updates.push(ConfigUpdate::set(path, value)),
        }
    }
    updates.extend(cleared.into_iter().map(|option| ConfigUpdate::delete(format!("network.wan.{}", option))));
    CallbackOutcome::EditConfig(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Identity;
    use crate::store::{ConfigStore, MemoryStore};
    use crate::templates::ActiveFields;

    fn submit(pairs: &[(&str, &str)]) -> ForisForm {
        let data: RequestData = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        WanPage.build_form(&Identity, Some(data))
    }

    #[test]
    fn dhcp_shows_only_protocol() {
        let store = MemoryStore::with_factory_defaults();
        let mut form = WanPage.build_form(&Identity, None);
        form.load_from(&store);
        let names: Vec<String> = form.active_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["proto"]);
    }

    #[test]
    fn static_configuration_is_saved_and_pppoe_cleared() {
        let store = MemoryStore::with_values([
            ("network.wan.proto", "pppoe"),
            ("network.wan.username", "user"),
            ("network.wan.password", "secret"),
        ]);
        let mut form = submit(&[
            ("proto", "static"),
            ("ipaddr", "203.0.113.7"),
            ("netmask", "255.255.255.0"),
            ("gateway", ""),
        ]);
        form.load_from(&store);
        assert!(form.validate(&Identity));
        form.save(&store).unwrap();

        assert_eq!(store.get("network.wan.proto").as_deref(), Some("static"));
        assert_eq!(store.get("network.wan.ipaddr").as_deref(), Some("203.0.113.7"));
        assert_eq!(store.get("network.wan.gateway"), None);
        assert_eq!(store.get("network.wan.username"), None);
        assert_eq!(store.get("network.wan.password"), None);
    }

    #[test]
    fn pppoe_requires_credentials() {
        let mut form = submit(&[("proto", "pppoe"), ("username", ""), ("password", "")]);
        assert!(!form.validate(&Identity));
        assert!(form.errors().contains_key("username"));
        assert!(form.errors().contains_key("password"));
    }

    #[test]
    fn unknown_protocol_is_not_saved() {
        let store = MemoryStore::with_factory_defaults();
        let mut form = submit(&[("proto", "evil\nvalue")]);
        form.load_from(&store);
        assert!(!form.validate(&Identity));
        assert!(form.errors().contains_key("proto"));
        assert_eq!(store.get("network.wan.proto").as_deref(), Some("dhcp"));
    }
}
