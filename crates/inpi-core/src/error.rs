//! Error types for the inpi-core library.

use thiserror::Error;

/// Main error type for the inpi library.
#[derive(Error, Debug)]
pub enum InpiError {
    /// Classification error.
    #[error("classification error: {0}")]
    Classification(#[from] ClassificationError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Schema lookup or definition error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Record store error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while classifying a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// The caller handed over text that cannot be classified.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while extracting fields.
///
/// Missing fields are never errors; they surface as `null` values and
/// as entries in the validation result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The caller handed over text that cannot be extracted from.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to validation schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered under this name.
    #[error("unknown schema: {0}")]
    Unknown(String),
}

/// Errors raised by record stores.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key contains characters a store cannot persist.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("store I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be (de)serialized.
    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InpiError {
    /// Whether this error reports a caller bug (bad input) rather than an
    /// environmental failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            InpiError::Classification(ClassificationError::InvalidInput(_))
                | InpiError::Extraction(ExtractionError::InvalidInput(_))
        )
    }
}

/// Result type for the inpi library.
pub type Result<T> = std::result::Result<T, InpiError>;
