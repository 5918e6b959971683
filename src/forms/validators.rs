use std::net::Ipv4Addr;

use crate::forms::FieldValue;
use crate::i18n::Localizer;

/// Server-side field validators.
///
/// Every validator also exposes a `data-validate*` description so the
/// browser side can run the same check before submitting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validator {
    NotEmpty,
    IPv4,
    Integer,
    InRange(i64, i64),
    LenRange(usize, usize),
    Domain,
}

impl Validator {
    pub fn js_name(&self) -> &'static str {
        match self {
            Validator::NotEmpty => "notempty",
            Validator::IPv4 => "ipv4",
            Validator::Integer => "integer",
            Validator::InRange(..) => "inrange",
            Validator::LenRange(..) => "lenrange",
            Validator::Domain => "domain",
        }
    }

    fn extra_data(&self) -> Option<(String, String)> {
        match self {
            Validator::InRange(min, max) => Some(("validate-inrange".into(), format!("{} {}", min, max))),
            Validator::LenRange(min, max) => Some(("validate-lenrange".into(), format!("{} {}", min, max))),
            _ => None,
        }
    }

    pub fn is_valid(&self, value: &FieldValue) -> bool {
        let text = value.to_string();
        let text = text.as_str();
        match self {
            Validator::NotEmpty => !value.is_empty(),
            Validator::IPv4 => text.parse::<Ipv4Addr>().is_ok(),
            Validator::Integer => text.parse::<i64>().is_ok(),
            Validator::InRange(min, max) => text
                .parse::<i64>()
                .map(|n| (*min..=*max).contains(&n))
                .unwrap_or(false),
            Validator::LenRange(min, max) => (*min..=*max).contains(&text.chars().count()),
            Validator::Domain => is_domain(text),
        }
    }

    pub fn message(&self, trans: &dyn Localizer) -> String {
        match self {
            Validator::NotEmpty => trans.trans("This field is required."),
            Validator::IPv4 => trans.trans("Not a valid IPv4 address."),
            Validator::Integer => trans.trans("Is not a number."),
            Validator::InRange(min, max) => trans
                .trans("This value should be between {min} and {max}.")
                .replace("{min}", &min.to_string())
                .replace("{max}", &max.to_string()),
            Validator::LenRange(min, max) => trans
                .trans("This value should be between {min} and {max} characters long.")
                .replace("{min}", &min.to_string())
                .replace("{max}", &max.to_string()),
            Validator::Domain => trans.trans("This is not a valid domain name."),
        }
    }
}

/// HTML `data-*` attributes (without the `data-` prefix) describing `validators`.
pub fn validators_as_data(validators: &[Validator]) -> Vec<(String, String)> {
    if validators.is_empty() {
        return Vec::new();
    }
    let names: Vec<&str> = validators.iter().map(Validator::js_name).collect();
    let mut data = vec![("validate".to_string(), names.join(" "))];
    data.extend(validators.iter().filter_map(Validator::extra_data));
    data
}

fn is_domain(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }
    s.trim_end_matches('.').split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
