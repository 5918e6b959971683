use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LANG: &str = "en";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_host() -> String {
    non_empty_var("FORIS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    match non_empty_var("FORIS_PORT") {
        Some(raw) => parse_port(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "Ignoring invalid FORIS_PORT");
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

pub fn get_lang() -> String {
    non_empty_var("FORIS_LANG").unwrap_or_else(|| DEFAULT_LANG.to_string())
}

/// Translation catalog to load; English source strings are used without one.
pub fn get_catalog_path() -> Option<PathBuf> {
    non_empty_var("FORIS_CATALOG").map(PathBuf::from)
}

/// Where committed configuration is persisted; in-memory only without one.
pub fn get_state_file() -> Option<PathBuf> {
    non_empty_var("FORIS_STATE_FILE").map(PathBuf::from)
}

pub fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|p| *p != 0)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
