use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access draft '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string key/value store for form drafts.
pub trait DraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Keeps drafts for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Keeps one file per draft key below a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().join("drafts"),
        }
    }

    /// Maps a key like `tripmind:planner` onto `tripmind_planner.json`.
    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.json", file_name))
    }
}

impl DraftStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.root).map_err(io_error)?;
        std::fs::write(self.path_for(key), value).map_err(io_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Reads the draft stored under `key`, falling back to the default when it is
/// missing or unreadable.
pub fn load_draft<T: DeserializeOwned + Default>(store: &dyn DraftStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(saved)) => match serde_json::from_str(&saved) {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("Ignoring unreadable draft '{}'. Reason:\r\n{}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            log::error!("Could not load draft '{}'. Reason:\r\n{}", key, e);
            T::default()
        }
    }
}

/// Writes `draft` under `key`, replacing whatever was there. Failures are logged.
pub fn save_draft<T: Serialize>(store: &mut dyn DraftStore, key: &str, draft: &T) {
    match serde_json::to_string(draft) {
        Ok(json) => {
            if let Err(e) = store.set(key, &json) {
                log::error!("Could not save draft '{}'. Reason:\r\n{}", key, e);
            }
        }
        Err(e) => log::error!("Could not serialize draft '{}'. Reason:\r\n{}", key, e),
    }
}

#[test]
fn memory_store_round_trips_values() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("tripmind:planner").unwrap(), None);
    store.set("tripmind:planner", "{}").unwrap();
    assert_eq!(store.get("tripmind:planner").unwrap().as_deref(), Some("{}"));
    store.remove("tripmind:planner").unwrap();
    assert_eq!(store.get("tripmind:planner").unwrap(), None);
}

#[test]
fn file_store_survives_a_new_instance() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let mut store = FileStore::new(root);
    store.set("tripmind:planner", r#"{"destination":"Tokyo"}"#).unwrap();

    let md = std::fs::metadata(root.join("drafts/tripmind_planner.json"));
    assert!(md.is_ok());

    let reopened = FileStore::new(root);
    assert_eq!(
        reopened.get("tripmind:planner").unwrap().as_deref(),
        Some(r#"{"destination":"Tokyo"}"#)
    );
    assert_eq!(reopened.get("tripmind:plan-trip").unwrap(), None);

    store.remove("tripmind:planner").unwrap();
    store.remove("tripmind:planner").unwrap();
}
