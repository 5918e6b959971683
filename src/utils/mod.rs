// URL handling utilities
pub mod url_encoding;

pub use url_encoding::{form_request_data, parse_urlencoded_body};
