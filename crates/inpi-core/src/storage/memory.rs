use std::collections::BTreeMap;

use super::{validate_key, RecordStore, StoreResult, StoredRecord};

/// In-memory store, ordered by key.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<String, StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn put(&mut self, record: StoredRecord) -> StoreResult<()> {
        validate_key(&record.storage_key)?;
        self.records.insert(record.storage_key.clone(), record);
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<StoredRecord>> {
        Ok(self.records.get(key).cloned())
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .records
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn delete(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.records.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::test_support::stored;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_put_replaces_wholesale() {
        let mut store = MemoryStore::new();
        store.put(stored("peticao_912345678_oposicao")).unwrap();

        let mut replacement = stored("peticao_912345678_oposicao");
        replacement.needs_review = false;
        store.put(replacement.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("peticao_912345678_oposicao").unwrap(), Some(replacement));
    }

    #[test]
    fn test_list_by_prefix_and_delete() {
        let mut store = MemoryStore::new();
        for key in ["peticao_2_x", "doc_oficial_1_y", "peticao_1_x"] {
            store.put(stored(key)).unwrap();
        }

        assert_eq!(store.list("peticao_").unwrap(), vec!["peticao_1_x", "peticao_2_x"]);
        assert_eq!(store.list("").unwrap().len(), 3);

        assert!(store.delete("peticao_1_x").unwrap());
        assert!(!store.delete("peticao_1_x").unwrap());
        assert_eq!(store.get("peticao_1_x").unwrap(), None);
    }

    #[test]
    fn test_rejects_invalid_key() {
        let mut store = MemoryStore::new();
        let err = store.put(stored("Peticao X")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(store.is_empty());
    }
}
