use askama::Template;

use crate::forms::FieldKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
    Checkbox,
    Dropdown,
    Radio,
    Hidden,
}

impl From<&FieldKind> for InputKind {
    fn from(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Textbox => InputKind::Text,
            FieldKind::Password => InputKind::Password,
            FieldKind::Checkbox => InputKind::Checkbox,
            FieldKind::Dropdown(_) => InputKind::Dropdown,
            FieldKind::Radio(_) => InputKind::Radio,
            FieldKind::Hidden => InputKind::Hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Title of a form section, shown before its first active field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionHeading {
    pub title: String,
    pub description: String,
}

/// Everything the field partial needs to render one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub html_id: String,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
    pub choices: Vec<ChoiceView>,
    pub hint: String,
    pub errors: Vec<String>,
    pub required: bool,
    pub css_class: String,
    /// `data-*` attributes, keys without the prefix.
    pub data_attrs: Vec<(String, String)>,
    /// Sections opened by this field, outermost first.
    pub sections: Vec<SectionHeading>,
}

impl FieldView {
    pub fn new(kind: InputKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            html_id: format!("field-{}", name),
            name,
            label: label.into(),
            kind,
            value: String::new(),
            checked: false,
            choices: Vec::new(),
            hint: String::new(),
            errors: Vec::new(),
            required: false,
            css_class: String::new(),
            data_attrs: Vec::new(),
            sections: Vec::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "_field.html")]
pub struct FieldTemplate<'a> {
    pub field: &'a FieldView,
}

/// Renders a single field; the form renderer calls it once per active field.
pub trait FieldPartial {
    fn render_field(&self, field: &FieldView) -> askama::Result<String>;
}

/// The `_field` partial.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldTemplatePartial;

impl FieldPartial for FieldTemplatePartial {
    fn render_field(&self, field: &FieldView) -> askama::Result<String> {
        FieldTemplate { field }.render()
    }
}
