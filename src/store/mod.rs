//! Router configuration storage.
//!
//! Paths follow the UCI `package.section.option` convention. Changes are
//! staged with [`ConfigStore::apply`] and only become visible after
//! [`ConfigStore::commit`].
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    Set { path: String, value: String },
    Delete { path: String },
}

impl ConfigUpdate {
    pub fn set(path: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigUpdate::Set { path: path.into(), value: value.into() }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        ConfigUpdate::Delete { path: path.into() }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait ConfigStore: Send + Sync {
    /// Committed value at `path`.
    fn get(&self, path: &str) -> Option<String>;

    /// Stages `updates`; they take effect on the next commit.
    fn apply(&self, updates: &[ConfigUpdate]);

    fn commit(&self) -> Result<(), StoreError>;
}

/// Values of a freshly installed router.
pub fn factory_defaults() -> Vec<(&'static str, &'static str)> {
    vec![
        ("network.wan.proto", "dhcp"),
        ("network.lan.ipaddr", "192.168.1.1"),
        ("network.lan.netmask", "255.255.255.0"),
        ("dhcp.lan.ignore", "0"),
        ("dhcp.lan.start", "100"),
        ("dhcp.lan.limit", "150"),
        ("resolver.common.forward_upstream", "1"),
        ("resolver.common.ignore_root_key", "0"),
        ("resolver.common.prefered_resolver", "kresd"),
        ("resolver.common.domain", "lan"),
    ]
}
