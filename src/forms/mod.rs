// Form model: sections, fields, requirements, validation and saving
pub mod field;
pub mod form;
pub mod validators;
pub mod value;

pub use field::{Choice, Field, FieldKind, Preprocessor, Requirement};
pub use form::{Callback, CallbackOutcome, Element, ForisForm, Section};
pub use validators::Validator;
pub use value::{bool_value, text_value, FieldValue, FormData, RequestData};
