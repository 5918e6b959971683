use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::forms::field::Field;
use crate::forms::validators::validators_as_data;
use crate::forms::{FieldValue, FormData, RequestData};
use crate::i18n::Localizer;
use crate::store::{ConfigStore, ConfigUpdate, StoreError};
use crate::templates::{ActiveFields, ChoiceView, FieldView, InputKind, SectionHeading};

/// What a save callback wants done with the cleaned form data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Everything was handled inside the callback.
    None,
    /// Stage these changes in the configuration store.
    EditConfig(Vec<ConfigUpdate>),
}

pub type Callback = Box<dyn Fn(&FormData) -> CallbackOutcome + Send + Sync>;

#[derive(Debug)]
pub enum Element {
    Section(Section),
    Field(Field),
}

/// A titled group of fields; sections may nest.
#[derive(Debug)]
pub struct Section {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    children: Vec<Element>,
}

impl Section {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { name: name.into(), title: title.into(), description: None, children: Vec::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_field(&mut self, field: Field) -> &mut Self {
        self.children.push(Element::Field(field));
        self
    }

    /// Adds a nested section and returns it for population.
    pub fn add_section(&mut self, section: Section) -> &mut Section {
        push_section(&mut self.children, section)
    }

}

fn push_section(children: &mut Vec<Element>, section: Section) -> &mut Section {
    children.push(Element::Section(section));
    match children.last_mut() {
        Some(Element::Section(s)) => s,
        _ => unreachable!("a section was just pushed"),
    }
}

fn collect_fields<'a>(children: &'a [Element], out: &mut Vec<&'a Field>) {
    for child in children {
        match child {
            Element::Section(section) => collect_fields(&section.children, out),
            Element::Field(field) => out.push(field),
        }
    }
}

/// A configuration form bound to store paths.
///
/// Values are layered: field defaults, then values loaded from the store,
/// then values submitted with the request. Only fields whose requirements
/// hold are active; inactive fields are neither rendered, validated nor saved.
pub struct ForisForm {
    pub name: String,
    children: Vec<Element>,
    request_data: Option<RequestData>,
    backend_data: FormData,
    errors: BTreeMap<String, String>,
    validated: bool,
    callbacks: Vec<Callback>,
}

impl fmt::Debug for ForisForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForisForm")
            .field("name", &self.name)
            .field("children", &self.children)
            .field("request_data", &self.request_data)
            .field("backend_data", &self.backend_data)
            .field("errors", &self.errors)
            .field("validated", &self.validated)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl ForisForm {
    /// `request_data` is `Some` for submitted forms, even when empty.
    pub fn new(name: impl Into<String>, request_data: Option<RequestData>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            request_data,
            backend_data: FormData::new(),
            errors: BTreeMap::new(),
            validated: false,
            callbacks: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: Section) -> &mut Section {
        push_section(&mut self.children, section)
    }

    pub fn add_callback<F>(&mut self, callback: F)
    where
        F: Fn(&FormData) -> CallbackOutcome + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Every field in declaration order, depth first.
    pub fn all_fields(&self) -> Vec<&Field> {
        let mut fields = Vec::new();
        collect_fields(&self.children, &mut fields);
        fields
    }

    /// Names of fields other fields depend on.
    pub fn required_by_others(&self) -> BTreeSet<String> {
        self.all_fields()
            .iter()
            .flat_map(|f| f.requirements.iter().map(|r| r.field.clone()))
            .collect()
    }

    pub fn defaults(&self) -> FormData {
        self.all_fields()
            .into_iter()
            .map(|f| (f.name.clone(), f.default_or_empty()))
            .collect()
    }

    /// Reads the current value of every field bound to a store path.
    pub fn load_from(&mut self, store: &dyn ConfigStore) {
        let mut loaded = FormData::new();
        for field in self.all_fields() {
            if let Some(path) = &field.config_path {
                if let Some(raw) = store.get(path) {
                    loaded.insert(field.name.clone(), field.preprocess(&raw));
                }
            }
        }
        tracing::debug!(form = %self.name, values = loaded.len(), "loaded values from store");
        self.backend_data = loaded;
    }

    /// Currently known data of active fields.
    pub fn data(&self) -> FormData {
        let mut data = self.defaults();
        data.extend(self.backend_data.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(request) = &self.request_data {
            for field in self.all_fields() {
                match request.get(&field.name) {
                    Some(raw) => {
                        let raw = if field.is_password() { raw.as_str() } else { raw.trim() };
                        data.insert(field.name.clone(), FieldValue::text(raw));
                    }
                    // browsers omit unchecked boxes from the submission
                    None if field.is_checkbox() => {
                        data.insert(field.name.clone(), FieldValue::Bool(false));
                    }
                    None => {}
                }
            }
        }
        self.clean_data(data)
    }

    fn clean_data(&self, data: FormData) -> FormData {
        let fields = self.all_fields();
        let mut cleaned = FormData::new();
        for field in &fields {
            if let Some(value) = data.get(&field.name) {
                let value = if field.is_checkbox() { value.clone().into_checkbox() } else { value.clone() };
                cleaned.insert(field.name.clone(), value);
            }
        }
        // dropping a field can break the requirements of fields depending on it
        loop {
            let inactive: Vec<&str> = fields
                .iter()
                .filter(|f| cleaned.contains_key(&f.name) && !f.has_requirements(&cleaned))
                .map(|f| f.name.as_str())
                .collect();
            if inactive.is_empty() {
                return cleaned;
            }
            for name in inactive {
                cleaned.remove(name);
            }
        }
    }

    /// Active fields, i.e. those kept in the cleaned data.
    pub fn satisfied_fields(&self) -> Vec<&Field> {
        let data = self.data();
        self.all_fields().into_iter().filter(|f| data.contains_key(&f.name)).collect()
    }

    /// Runs the validators of every active field and records the first
    /// failure of each. Returns whether the form is valid.
    pub fn validate(&mut self, trans: &dyn Localizer) -> bool {
        let data = self.data();
        let mut errors = BTreeMap::new();
        for field in self.satisfied_fields() {
            let value = data.get(&field.name).cloned().unwrap_or_else(|| field.default_or_empty());
            if !field.accepts_choice(&value) {
                errors.insert(field.name.clone(), trans.trans("Select one of the offered options."));
                continue;
            }
            if !field.required && value.is_empty() {
                continue;
            }
            if let Some(failed) = field.effective_validators().iter().find(|v| !v.is_valid(&value)) {
                errors.insert(field.name.clone(), failed.message(trans));
            }
        }
        self.validated = true;
        self.errors = errors;
        tracing::debug!(form = %self.name, errors = self.errors.len(), "form validated");
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.validated && self.errors.is_empty()
    }

    /// Hands the cleaned data to every callback in order, stages the
    /// resulting updates and commits the store.
    pub fn save(&self, store: &dyn ConfigStore) -> Result<(), StoreError> {
        let data = self.data();
        for (idx, callback) in self.callbacks.iter().enumerate() {
            match callback(&data) {
                CallbackOutcome::None => {
                    tracing::debug!(form = %self.name, callback = idx, "callback handled data itself");
                }
                CallbackOutcome::EditConfig(updates) => {
                    tracing::debug!(form = %self.name, callback = idx, updates = updates.len(), "staging updates");
                    store.apply(&updates);
                }
            }
        }
        store.commit()
    }

    fn field_view(&self, field: &Field, data: &FormData, required_by_others: &BTreeSet<String>) -> FieldView {
        let value = data.get(&field.name).cloned().unwrap_or_else(|| field.default_or_empty());
        let errors: Vec<String> = self.errors.get(&field.name).cloned().into_iter().collect();

        let mut classes = Vec::new();
        if required_by_others.contains(&field.name) {
            classes.push("has-requirements");
        }
        if !errors.is_empty() {
            classes.push("field-validation-fail");
        }

        let text = value.to_string();
        let (value_attr, checked) = if field.is_checkbox() {
            ("1".to_string(), value.as_bool())
        } else {
            (text.clone(), false)
        };

        FieldView {
            name: field.name.clone(),
            html_id: format!("field-{}", field.name),
            label: field.label.clone(),
            kind: InputKind::from(&field.kind),
            value: value_attr,
            checked,
            choices: field
                .choices()
                .iter()
                .map(|c| ChoiceView { value: c.value.clone(), label: c.label.clone(), selected: c.value == text })
                .collect(),
            hint: field.hint.clone(),
            errors,
            required: field.required,
            css_class: classes.join(" "),
            data_attrs: validators_as_data(&field.effective_validators()),
            sections: Vec::new(),
        }
    }

    /// Walks `children` depth first. Section headings wait in `pending`
    /// until the first active field inside them; empty sections are skipped.
    fn collect_views(
        &self,
        children: &[Element],
        data: &FormData,
        required_by_others: &BTreeSet<String>,
        pending: &mut Vec<SectionHeading>,
        out: &mut Vec<FieldView>,
    ) {
        for child in children {
            match child {
                Element::Section(section) => {
                    let depth = pending.len();
                    pending.push(SectionHeading {
                        title: section.title.clone(),
                        description: section.description.clone().unwrap_or_default(),
                    });
                    self.collect_views(&section.children, data, required_by_others, pending, out);
                    pending.truncate(depth);
                }
                Element::Field(field) if data.contains_key(&field.name) => {
                    let mut view = self.field_view(field, data, required_by_others);
                    view.sections = std::mem::take(pending);
                    out.push(view);
                }
                Element::Field(_) => {}
            }
        }
    }
}

impl ActiveFields for ForisForm {
    fn active_fields(&self) -> Vec<FieldView> {
        let data = self.data();
        let required_by_others = self.required_by_others();
        let mut views = Vec::new();
        self.collect_views(&self.children, &data, &required_by_others, &mut Vec::new(), &mut views);
        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field::{Choice, FieldKind};
    use crate::forms::validators::Validator;
    use crate::i18n::Identity;
    use crate::store::MemoryStore;

    fn proto_form(request: Option<RequestData>) -> ForisForm {
        let mut form = ForisForm::new("wan", request);
        let section = form.add_section(Section::new("wan", "WAN"));
        section
            .add_field(
                Field::new(
                    FieldKind::Dropdown(vec![Choice::new("dhcp", "DHCP"), Choice::new("static", "Static")]),
                    "proto",
                    "Protocol",
                )
                .config_path("network.wan.proto")
                .default_value(FieldValue::text("dhcp")),
            )
            .add_field(
                Field::new(FieldKind::Textbox, "ipaddr", "IP address")
                    .config_path("network.wan.ipaddr")
                    .required()
                    .validator(Validator::IPv4)
                    .requires_value("proto", FieldValue::text("static")),
            )
            .add_field(Field::new(FieldKind::Textbox, "gateway", "Gateway").requires("ipaddr"));
        form.add_callback(|data| {
            CallbackOutcome::EditConfig(vec![ConfigUpdate::set(
                "network.wan.proto",
                crate::forms::text_value(data, "proto"),
            )])
        });
        form
    }

    fn request(pairs: &[(&str, &str)]) -> RequestData {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_are_overridden_by_store_then_request() {
        let store = MemoryStore::with_values([("network.wan.proto", "static")]);
        let mut form = proto_form(None);
        assert_eq!(form.data().get("proto"), Some(&FieldValue::text("dhcp")));
        form.load_from(&store);
        assert_eq!(form.data().get("proto"), Some(&FieldValue::text("static")));

        let mut form = proto_form(Some(request(&[("proto", "dhcp")])));
        form.load_from(&store);
        assert_eq!(form.data().get("proto"), Some(&FieldValue::text("dhcp")));
    }

    #[test]
    fn inactive_fields_are_dropped_from_data() {
        let form = proto_form(None);
        let data = form.data();
        assert!(data.contains_key("proto"));
        assert!(!data.contains_key("ipaddr"));
    }

    #[test]
    fn requirements_chain_through_active_fields() {
        let form = proto_form(None);
        let names: Vec<&str> = form.satisfied_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["proto"]);

        let form = proto_form(Some(request(&[("proto", "static"), ("ipaddr", "10.0.0.2")])));
        let names: Vec<&str> = form.satisfied_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["proto", "ipaddr", "gateway"]);
    }

    #[test]
    fn validation_reports_first_failure_per_active_field() {
        let mut form = proto_form(Some(request(&[("proto", "static"), ("ipaddr", "")])));
        assert!(!form.validate(&Identity));
        assert_eq!(form.errors().get("ipaddr").map(String::as_str), Some("This field is required."));

        let mut form = proto_form(Some(request(&[("proto", "static"), ("ipaddr", "10.0.0")])));
        assert!(!form.validate(&Identity));
        assert_eq!(form.errors().get("ipaddr").map(String::as_str), Some("Not a valid IPv4 address."));

        let mut form = proto_form(Some(request(&[("proto", "dhcp"), ("ipaddr", "garbage")])));
        assert!(form.validate(&Identity));
        assert!(form.is_valid());
    }

    #[test]
    fn unchecked_checkbox_is_false_on_submission() {
        let mut form = ForisForm::new("dns", Some(RequestData::new()));
        form.add_section(Section::new("dns", "DNS")).add_field(
            Field::new(FieldKind::Checkbox, "forward", "Forward").default_value(FieldValue::Bool(true)),
        );
        assert_eq!(form.data().get("forward"), Some(&FieldValue::Bool(false)));

        let mut form = ForisForm::new("dns", None);
        form.add_section(Section::new("dns", "DNS")).add_field(
            Field::new(FieldKind::Checkbox, "forward", "Forward").default_value(FieldValue::Bool(true)),
        );
        assert_eq!(form.data().get("forward"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn save_stages_callback_updates_and_commits() {
        let store = MemoryStore::new();
        let form = proto_form(Some(request(&[("proto", "static"), ("ipaddr", "10.0.0.2")])));
        form.save(&store).unwrap();
        assert_eq!(store.get("network.wan.proto").as_deref(), Some("static"));
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn field_views_follow_active_fields_in_order() {
        let mut form = proto_form(Some(request(&[("proto", "static"), ("ipaddr", "bad")])));
        form.validate(&Identity);
        let views = form.active_fields();
        let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["proto", "ipaddr", "gateway"]);

        let proto = &views[0];
        assert_eq!(proto.css_class, "has-requirements");
        assert!(proto.choices.iter().any(|c| c.value == "static" && c.selected));

        let ipaddr = &views[1];
        assert_eq!(ipaddr.css_class, "has-requirements field-validation-fail");
        assert_eq!(ipaddr.errors, vec!["Not a valid IPv4 address.".to_string()]);
        assert!(ipaddr.required);
        assert_eq!(ipaddr.data_attrs[0], ("validate".to_string(), "notempty ipv4".to_string()));
    }

    #[test]
    fn nested_sections_flatten_depth_first() {
        let mut form = ForisForm::new("nested", None);
        let outer = form.add_section(Section::new("outer", "Outer"));
        outer.add_field(Field::new(FieldKind::Textbox, "a", "A"));
        outer.add_section(Section::new("inner", "Inner")).add_field(Field::new(FieldKind::Textbox, "b", "B"));
        outer.add_field(Field::new(FieldKind::Hidden, "c", "C"));
        let names: Vec<&str> = form.all_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn chained_requirements_drop_dependents_from_data() {
        let form = proto_form(Some(request(&[("proto", "dhcp"), ("ipaddr", "10.0.0.2"), ("gateway", "10.0.0.1")])));
        let keys: Vec<String> = form.data().into_keys().collect();
        assert_eq!(keys, vec!["proto".to_string()]);

        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut form = proto_form(Some(request(&[("proto", "dhcp"), ("gateway", "10.0.0.1")])));
        let sink = seen.clone();
        form.add_callback(move |data| {
            sink.lock().unwrap().extend(data.keys().cloned());
            CallbackOutcome::None
        });
        form.save(&MemoryStore::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["proto".to_string()]);
    }

    #[test]
    fn request_text_is_trimmed_except_passwords() {
        let mut form = ForisForm::new("trim", Some(request(&[("addr", " 10.0.0.1 "), ("secret", " pw ")])));
        form.add_section(Section::new("s", "S"))
            .add_field(Field::new(FieldKind::Textbox, "addr", "Address").required().validator(Validator::IPv4))
            .add_field(Field::new(FieldKind::Password, "secret", "Secret"));
        assert!(form.validate(&Identity));
        let data = form.data();
        assert_eq!(data.get("addr"), Some(&FieldValue::text("10.0.0.1")));
        assert_eq!(data.get("secret"), Some(&FieldValue::text(" pw ")));
    }

    #[test]
    fn undeclared_choice_is_rejected() {
        let mut form = proto_form(Some(request(&[("proto", "evil\nvalue")])));
        assert!(!form.validate(&Identity));
        assert_eq!(form.errors().get("proto").map(String::as_str), Some("Select one of the offered options."));

        let mut form = proto_form(Some(request(&[("proto", "")])));
        assert!(!form.validate(&Identity));
        assert!(form.errors().contains_key("proto"));
    }

    #[test]
    fn section_headings_open_before_first_active_field() {
        let mut form = ForisForm::new("nested", None);
        let outer = form.add_section(Section::new("outer", "Outer"));
        outer.add_section(Section::new("empty", "Empty")).add_field(
            Field::new(FieldKind::Textbox, "hidden_away", "X").requires_value("a", FieldValue::text("never")),
        );
        outer.add_field(Field::new(FieldKind::Textbox, "a", "A"));
        outer
            .add_section(Section::new("inner", "Inner").with_description("Inner fields"))
            .add_field(Field::new(FieldKind::Textbox, "b", "B"))
            .add_field(Field::new(FieldKind::Textbox, "c", "C"));

        let views = form.active_fields();
        let titles = |v: &FieldView| v.sections.iter().map(|s| s.title.clone()).collect::<Vec<_>>();
        assert_eq!(views.len(), 3);
        assert_eq!(titles(&views[0]), vec!["Outer"]);
        assert_eq!(titles(&views[1]), vec!["Inner"]);
        assert_eq!(views[1].sections[0].description, "Inner fields");
        assert!(views[2].sections.is_empty());
    }
}
