//! Key-value persistence for extraction records.
//!
//! A store maps storage keys to [`StoredRecord`]s. `put` replaces the
//! stored value wholesale; there is no field-level merge.

mod directory;
mod memory;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::extract::ExtractionOutput;
use crate::models::ExtractionRecord;
use crate::schema::ValidationResult;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StorageError>;

/// Value kept under a storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub storage_key: String,
    pub record: ExtractionRecord,
    pub validation: ValidationResult,
    /// The record failed validation and should be checked by hand.
    pub needs_review: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl From<ExtractionOutput> for StoredRecord {
    fn from(output: ExtractionOutput) -> Self {
        Self {
            needs_review: !output.validation.valid,
            storage_key: output.storage_key,
            record: output.record,
            validation: output.validation,
            warnings: output.warnings,
        }
    }
}

/// Trait for record stores.
pub trait RecordStore {
    /// Insert or replace the record under its storage key.
    fn put(&mut self, record: StoredRecord) -> StoreResult<()>;

    /// Fetch a record; `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<StoredRecord>>;

    /// Keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Remove a record. Returns whether it existed.
    fn delete(&mut self, key: &str) -> StoreResult<bool>;
}

/// Check that a key only uses `[a-z0-9_]`.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::StoredRecord;
    use crate::models::{Category, ClassificationResult, ExtractionRecord, Sector};
    use crate::schema::ValidationResult;

    pub fn stored(key: &str) -> StoredRecord {
        let classification = ClassificationResult::unknown(Sector::Trademarks);
        let record = ExtractionRecord::new(
            &classification,
            Category::Unknown,
            "desconhecido_generico",
            "GenericExtractor",
        );
        StoredRecord {
            storage_key: key.to_string(),
            record,
            validation: ValidationResult::default(),
            needs_review: true,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("peticao_912345678_recurso_indef_850240123456").is_ok());
        assert!(validate_key("doc_oficial_br1020140042067_recurso_nao_provido_patente").is_ok());

        for bad in ["", "Peticao", "../etc/passwd", "a-b", "chave com espaço"] {
            assert!(
                matches!(validate_key(bad), Err(StorageError::InvalidKey(_))),
                "accepted {:?}",
                bad
            );
        }
    }
}
