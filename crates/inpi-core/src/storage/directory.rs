use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{validate_key, RecordStore, StoreResult, StoredRecord};
use crate::error::StorageError;

/// Store keeping one pretty-printed JSON file per key (`{key}.json`).
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = dir.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl RecordStore for DirectoryStore {
    fn put(&mut self, record: StoredRecord) -> StoreResult<()> {
        let key = record.storage_key.as_str();
        let path = self.path_for(key)?;

        let json = serde_json::to_string_pretty(&record).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })?;

        // Write then rename so readers never see a half-written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_error(key))?;
        fs::rename(&tmp, &path).map_err(io_error(key))?;

        debug!(key, path = %path.display(), "record stored");
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<StoredRecord>> {
        let path = self.path_for(key)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(key)(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let root = self.root.display().to_string();
        let entries = fs::read_dir(&self.root).map_err(io_error(&root))?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(io_error(&root))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with(prefix) && validate_key(stem).is_ok() {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn delete(&mut self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::stored;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::open(dir.path().join("records")).unwrap();

        let record = stored("doc_oficial_912345678_recurso_nao_provido");
        store.put(record.clone()).unwrap();

        let path = store.root().join("doc_oficial_912345678_recurso_nao_provido.json");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"storage_key\""));

        let reopened = DirectoryStore::open(store.root()).unwrap();
        assert_eq!(
            reopened.get("doc_oficial_912345678_recurso_nao_provido").unwrap(),
            Some(record)
        );
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        store.put(stored("peticao_1_x")).unwrap();
        store.put(stored("doc_oficial_1_y")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("Bad Name.json"), "{}").unwrap();

        assert_eq!(store.list("").unwrap(), vec!["doc_oficial_1_y", "peticao_1_x"]);
        assert_eq!(store.list("peticao").unwrap(), vec!["peticao_1_x"]);
    }

    #[test]
    fn test_missing_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::open(dir.path()).unwrap();

        assert_eq!(store.get("peticao_1_x").unwrap(), None);
        assert!(!store.delete("peticao_1_x").unwrap());

        store.put(stored("peticao_1_x")).unwrap();
        assert!(store.delete("peticao_1_x").unwrap());
        assert_eq!(store.list("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("peticao_1_x.json"), "{ nope").unwrap();

        let err = store.get("peticao_1_x").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        assert!(matches!(store.get("../x"), Err(StorageError::InvalidKey(_))));
    }
}
