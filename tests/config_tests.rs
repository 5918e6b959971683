use foris::config;
use std::env;
use std::path::PathBuf;

#[test]
fn test_parse_port_accepts_valid_values() {
    assert_eq!(config::parse_port("8080"), Some(8080));
    assert_eq!(config::parse_port(" 443 "), Some(443));
}

#[test]
fn test_parse_port_rejects_garbage_and_zero() {
    assert_eq!(config::parse_port("http"), None);
    assert_eq!(config::parse_port("0"), None);
    assert_eq!(config::parse_port("70000"), None);
}

#[test]
fn test_get_host_uses_default() {
    env::remove_var("FORIS_HOST");
    assert_eq!(config::get_host(), config::DEFAULT_HOST);
}

#[test]
fn test_get_port_falls_back_on_invalid_value() {
    env::set_var("FORIS_PORT", "not-a-port");
    assert_eq!(config::get_port(), config::DEFAULT_PORT);
    env::remove_var("FORIS_PORT");
}

#[test]
fn test_get_lang_trims_value() {
    env::set_var("FORIS_LANG", "  cs ");
    assert_eq!(config::get_lang(), "cs");
    env::remove_var("FORIS_LANG");
}

#[test]
fn test_blank_catalog_path_is_ignored() {
    env::set_var("FORIS_CATALOG", "   ");
    assert_eq!(config::get_catalog_path(), None);
    env::remove_var("FORIS_CATALOG");
}

#[test]
fn test_get_state_file_reads_env() {
    env::set_var("FORIS_STATE_FILE", "/tmp/foris-state.json");
    assert_eq!(config::get_state_file(), Some(PathBuf::from("/tmp/foris-state.json")));
    env::remove_var("FORIS_STATE_FILE");
}
