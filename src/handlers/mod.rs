pub mod config_pages;
pub mod helpers;
pub mod system;

pub use config_pages::{config_page_get, config_page_post};
pub use system::{root_get, stylesheet_get};
