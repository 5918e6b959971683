use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{factory_defaults, ConfigStore, ConfigUpdate, StoreError};

#[derive(Default)]
struct Inner {
    committed: BTreeMap<String, String>,
    staged: Vec<ConfigUpdate>,
}

/// In-memory store, optionally persisted to a JSON state file on commit.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    state_file: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let committed = values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { inner: Mutex::new(Inner { committed, staged: Vec::new() }), state_file: None }
    }

    pub fn with_factory_defaults() -> Self {
        Self::with_values(factory_defaults())
    }

    /// Opens a store persisted at `path`, starting from factory defaults
    /// when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let committed: BTreeMap<String, String> = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            tracing::info!(path = %path.display(), "state file not found, using factory defaults");
            factory_defaults().into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
        };
        Ok(Self {
            inner: Mutex::new(Inner { committed, staged: Vec::new() }),
            state_file: Some(path.to_path_buf()),
        })
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).committed.clone()
    }

    /// Number of staged, uncommitted updates.
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).staged.len()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, path: &str) -> Option<String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).committed.get(path).cloned()
    }

    fn apply(&self, updates: &[ConfigUpdate]) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.staged.extend_from_slice(updates);
    }

    fn commit(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let mut committed = inner.committed.clone();
        for update in &inner.staged {
            match update {
                ConfigUpdate::Set { path, value } => {
                    committed.insert(path.clone(), value.clone());
                }
                ConfigUpdate::Delete { path } => {
                    committed.remove(path);
                }
            }
        }
        if let Some(path) = &self.state_file {
            fs::write(path, serde_json::to_string_pretty(&committed)?)?;
        }
        tracing::info!(changes = inner.staged.len(), "configuration committed");
        inner.committed = committed;
        inner.staged.clear();
        Ok(())
    }
}
