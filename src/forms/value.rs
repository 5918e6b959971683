use std::collections::BTreeMap;
use std::fmt;

/// Cleaned form data keyed by field name.
pub type FormData = BTreeMap<String, FieldValue>;

/// Raw values submitted with a request, keyed by field name.
pub type RequestData = BTreeMap<String, String>;

/// A single form value after cleaning.
///
/// Checkbox fields always hold `Bool`, every other field holds `Text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => is_truthy(s),
        }
    }

    /// Empty text and unchecked boxes both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Bool(b) => !b,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Checkbox coercion: `"0"` and empty text are false, any other text is true.
    pub fn into_checkbox(self) -> FieldValue {
        match self {
            FieldValue::Bool(b) => FieldValue::Bool(b),
            FieldValue::Text(s) => FieldValue::Bool(is_truthy(&s)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(true) => f.write_str("1"),
            FieldValue::Bool(false) => f.write_str("0"),
        }
    }
}

fn is_truthy(s: &str) -> bool {
    !s.is_empty() && s != "0"
}

/// Text of a field in `data`, or an empty string when it is absent.
pub fn text_value(data: &FormData, name: &str) -> String {
    data.get(name).map(|v| v.to_string()).unwrap_or_default()
}

/// Boolean value of a field in `data`; absent fields are false.
pub fn bool_value(data: &FormData, name: &str) -> bool {
    data.get(name).map(FieldValue::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_coercion_treats_zero_and_empty_as_false() {
        assert_eq!(FieldValue::text("0").into_checkbox(), FieldValue::Bool(false));
        assert_eq!(FieldValue::text("").into_checkbox(), FieldValue::Bool(false));
        assert_eq!(FieldValue::text("1").into_checkbox(), FieldValue::Bool(true));
        assert_eq!(FieldValue::text("on").into_checkbox(), FieldValue::Bool(true));
    }

    #[test]
    fn bools_display_as_uci_flags() {
        assert_eq!(FieldValue::Bool(true).to_string(), "1");
        assert_eq!(FieldValue::Bool(false).to_string(), "0");
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("x").is_empty());
        assert!(FieldValue::Bool(false).is_empty());
    }
}
