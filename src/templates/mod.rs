// Page layout
pub mod base_template;
pub use base_template::{ConfigBaseTemplate, NavItem};

// Render inputs shared by the page templates
pub mod context;
pub use context::{ActiveFields, CsrfTokenSource, RequestInfo, TrustedMarkup};

// Configuration form and its partials
pub mod config_form_template;
pub mod field_template;
pub mod messages_template;

pub use config_form_template::{render_config_form, ConfigFormTemplate, FormContext};
pub use field_template::{
    ChoiceView, FieldPartial, FieldTemplate, FieldTemplatePartial, FieldView, InputKind, SectionHeading,
};
pub use messages_template::MessagesTemplate;
