pub mod config;
pub mod csrf;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod pages;
pub mod routes;
pub mod store;
pub mod templates;
pub mod utils;
