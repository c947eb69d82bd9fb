//! Core library for INPI (Brazilian patent and trademark office) filings.
//!
//! This crate provides:
//! - Two-stage classification (petition / official document, then type)
//! - A static router from type ids to field extractors
//! - Rule-based field extraction for trademark and patent appeals
//! - Declarative schema validation of extracted records
//! - Key-value record stores (in-memory and directory-backed)

pub mod classifier;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod storage;
pub mod text;

pub use classifier::{CategoryRules, DocumentClassifier, TypeClassifier};
pub use error::{InpiError, Result};
pub use extract::{
    extract, resolve_extractor, schema_name_for, storage_key, DocumentExtractor, ExtractionInput,
    ExtractionOutput, ExtractorKind,
};
pub use models::{
    Attachment, Category, ClassificationResult, ExtractionConfig, ExtractionRecord, FieldValue,
    InpiConfig, Sector,
};
pub use pipeline::{DocumentPipeline, PipelineOutput};
pub use schema::{validate, Schema, ValidationResult};
pub use storage::{DirectoryStore, MemoryStore, RecordStore, StoredRecord};
