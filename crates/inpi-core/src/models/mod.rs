//! Data models for classification results, extraction records and configuration.

pub mod classification;
pub mod config;
pub mod record;

pub use classification::{Category, ClassificationResult, Sector};
pub use config::{ClassificationConfig, ExtractionConfig, InpiConfig, MarkerSet, StorageConfig};
pub use record::{Attachment, ExtractionRecord, FieldValue, OPINION_END_MARKER, OPINION_START_MARKER};
