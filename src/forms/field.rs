use crate::forms::validators::Validator;
use crate::forms::{FieldValue, FormData};

/// A selectable option of a dropdown or radio group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Textbox,
    Password,
    Checkbox,
    Dropdown(Vec<Choice>),
    Radio(Vec<Choice>),
    Hidden,
}

/// Another field that must be active (and optionally hold `value`)
/// for the owning field to be active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub field: String,
    pub value: Option<FieldValue>,
}

/// Converts a raw value read from the configuration store into a field value.
pub type Preprocessor = fn(&str) -> FieldValue;

#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub config_path: Option<String>,
    pub preproc: Option<Preprocessor>,
    pub default: Option<FieldValue>,
    pub validators: Vec<Validator>,
    pub hint: String,
    pub requirements: Vec<Requirement>,
}

impl Field {
    pub fn new(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            required: false,
            config_path: None,
            preproc: None,
            default: None,
            validators: Vec::new(),
            hint: String::new(),
            requirements: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn preproc(mut self, f: Preprocessor) -> Self {
        self.preproc = Some(f);
        self
    }

    pub fn default_value(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Active only while `field` is active.
    pub fn requires(mut self, field: impl Into<String>) -> Self {
        self.requirements.push(Requirement { field: field.into(), value: None });
        self
    }

    /// Active only while `field` is active and equal to `value`.
    pub fn requires_value(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.requirements.push(Requirement { field: field.into(), value: Some(value) });
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    pub fn is_password(&self) -> bool {
        self.kind == FieldKind::Password
    }

    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Dropdown(choices) | FieldKind::Radio(choices) => choices,
            _ => &[],
        }
    }

    /// Dropdowns and radio groups only take one of their declared values.
    pub fn accepts_choice(&self, value: &FieldValue) -> bool {
        let choices = self.choices();
        if choices.is_empty() {
            return true;
        }
        let text = value.to_string();
        choices.iter().any(|c| c.value == text)
    }

    /// Validators to run, with the implicit `NotEmpty` of required fields first.
    pub fn effective_validators(&self) -> Vec<Validator> {
        let mut validators = Vec::with_capacity(self.validators.len() + 1);
        if self.required {
            validators.push(Validator::NotEmpty);
        }
        validators.extend(self.validators.iter().filter(|v| **v != Validator::NotEmpty).cloned());
        validators
    }

    /// Value used when neither the store nor the request provide one.
    pub fn default_or_empty(&self) -> FieldValue {
        match (&self.default, self.is_checkbox()) {
            (Some(v), true) => v.clone().into_checkbox(),
            (Some(v), false) => v.clone(),
            (None, true) => FieldValue::Bool(false),
            (None, false) => FieldValue::text(""),
        }
    }

    pub fn preprocess(&self, raw: &str) -> FieldValue {
        match self.preproc {
            Some(f) => f(raw),
            None if self.is_checkbox() => FieldValue::text(raw).into_checkbox(),
            None => FieldValue::text(raw),
        }
    }

    pub fn has_requirements(&self, data: &FormData) -> bool {
        self.requirements.iter().all(|req| match (data.get(&req.field), &req.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}
