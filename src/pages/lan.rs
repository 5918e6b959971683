use crate::forms::validators::Validator;
use crate::forms::{
    bool_value, text_value, CallbackOutcome, Field, FieldKind, FieldValue, ForisForm, FormData, RequestData, Section,
};
use crate::i18n::Localizer;
use crate::pages::ConfigPage;
use crate::store::ConfigUpdate;
use crate::templates::TrustedMarkup;

pub struct LanPage;

// dhcp.lan.ignore is "1" when the DHCP server is off
fn dhcp_enabled_from_ignore(raw: &str) -> FieldValue {
    FieldValue::Bool(raw != "1")
}

impl ConfigPage for LanPage {
    fn slug(&self) -> &'static str {
        "lan"
    }

    fn title(&self) -> &'static str {
        "LAN"
    }

    fn description(&self, trans: &dyn Localizer) -> TrustedMarkup {
        TrustedMarkup::translated(
            trans,
            "This section contains settings for the local network (LAN). The provided defaults are \
             suitable for most networks. <br><strong>Note:</strong> If you change the router IP \
             address, all computers in LAN, probably including the one you are using now, will need \
             to obtain a <strong>new IP address</strong> which does <strong>not</strong> happen \
             immediately.",
        )
    }

    fn build_form(&self, trans: &dyn Localizer, request_data: Option<RequestData>) -> ForisForm {
        let mut form = ForisForm::new("lan", request_data);
        let lan = form.add_section(Section::new("lan", trans.trans("LAN")));
        lan.add_field(
            Field::new(FieldKind::Textbox, "lan_ipaddr", trans.trans("Router IP address"))
                .config_path("network.lan.ipaddr")
                .required()
                .validator(Validator::IPv4)
                .hint(trans.trans("Router's IP address in inner network. Also defines the range of assigned IP addresses.")),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "lan_netmask", trans.trans("Network mask"))
                .config_path("network.lan.netmask")
                .required()
                .validator(Validator::IPv4),
        );

        let dhcp = lan.add_section(
            Section::new("dhcp", trans.trans("DHCP server"))
                .with_description(trans.trans("The DHCP server assigns addresses to devices in your network.")),
        );
        dhcp.add_field(
            Field::new(FieldKind::Checkbox, "dhcp_enabled", trans.trans("Enable DHCP"))
                .config_path("dhcp.lan.ignore")
                .preproc(dhcp_enabled_from_ignore)
                .default_value(FieldValue::Bool(true)),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "dhcp_start", trans.trans("DHCP start"))
                .config_path("dhcp.lan.start")
                .validator(Validator::Integer)
                .validator(Validator::InRange(1, 254))
                .default_value(FieldValue::text("100"))
                .requires_value("dhcp_enabled", FieldValue::Bool(true)),
        )
        .add_field(
            Field::new(FieldKind::Textbox, "dhcp_limit", trans.trans("DHCP max leases"))
                .config_path("dhcp.lan.limit")
                .validator(Validator::Integer)
                .validator(Validator::InRange(1, 253))
                .default_value(FieldValue::text("150"))
                .requires_value("dhcp_enabled", FieldValue::Bool(true)),
        );

        form.add_callback(lan_updates);
        form
    }
}

fn lan_updates(data: &FormData) -> CallbackOutcome {
    let enabled = bool_value(data, "dhcp_enabled");
    let mut updates = vec![
        ConfigUpdate::set("network.lan.ipaddr", text_value(data, "lan_ipaddr")),
        ConfigUpdate::set("network.lan.netmask", text_value(data, "lan_netmask")),
        ConfigUpdate::set("dhcp.lan.ignore", if enabled { "0" } else { "1" }),
    ];
    if enabled {
        for (field, path) in [("dhcp_start", "dhcp.lan.start"), ("dhcp_limit", "dhcp.lan.limit")] {
            let value = text_value(data, field);
            if !value.is_empty() {
                updates.push(ConfigUpdate::set(path, value));
            }
        }
    }
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
        LanPage.build_form(&Identity, Some(data))
    }

    #[test]
    fn dhcp_fields_follow_ignore_flag() {
        let store = MemoryStore::with_factory_defaults();
        let mut form = LanPage.build_form(&Identity, None);
        form.load_from(&store);
        assert_eq!(form.active_fields().len(), 5);

        let store = MemoryStore::with_values([("dhcp.lan.ignore", "1")]);
        let mut form = LanPage.build_form(&Identity, None);
        form.load_from(&store);
        let names: Vec<String> = form.active_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["lan_ipaddr", "lan_netmask", "dhcp_enabled"]);
    }

    #[test]
    fn out_of_range_dhcp_start_is_rejected() {
        let mut form = submit(&[
            ("lan_ipaddr", "192.168.1.1"),
            ("lan_netmask", "255.255.255.0"),
            ("dhcp_enabled", "1"),
            ("dhcp_start", "300"),
            ("dhcp_limit", "10"),
        ]);
        assert!(!form.validate(&Identity));
        assert_eq!(
            form.errors().get("dhcp_start").map(String::as_str),
            Some("This value should be between 1 and 254.")
        );
    }

    #[test]
    fn disabling_dhcp_sets_ignore_flag() {
        let store = MemoryStore::with_factory_defaults();
        let mut form = submit(&[("lan_ipaddr", "10.0.0.1"), ("lan_netmask", "255.0.0.0")]);
        form.load_from(&store);
        assert!(form.validate(&Identity));
        form.save(&store).unwrap();
        assert_eq!(store.get("dhcp.lan.ignore").as_deref(), Some("1"));
        assert_eq!(store.get("network.lan.ipaddr").as_deref(), Some("10.0.0.1"));
        assert_eq!(store.get("dhcp.lan.start").as_deref(), Some("100"));
    }

    #[test]
    fn padded_address_is_saved_trimmed() {
        let store = MemoryStore::with_factory_defaults();
        let mut form = submit(&[("lan_ipaddr", " 10.0.0.1 "), ("lan_netmask", "255.255.255.0")]);
        form.load_from(&store);
        assert!(form.validate(&Identity));
        form.save(&store).unwrap();
        assert_eq!(store.get("network.lan.ipaddr").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn dhcp_section_heading_comes_with_its_checkbox() {
        let form = LanPage.build_form(&Identity, None);
        let views = form.active_fields();
        let dhcp = views.iter().find(|v| v.name == "dhcp_enabled").unwrap();
        assert_eq!(dhcp.sections[0].title, "DHCP server");
        assert_eq!(views[0].sections[0].title, "LAN");
    }
}
