//! Field extraction for classified INPI documents.
//!
//! A classified document is routed to its type's extractor (or the generic
//! one), producing a record, its storage key and a validation report.

pub mod generic;
pub mod router;
pub mod rules;
pub mod types;

pub use generic::GenericExtractor;
pub use router::{
    is_registered, registered_types, registered_types_for, resolve_extractor, route, ExtractorKind,
    RouteEntry, ROUTES,
};
pub use types::{
    PatentAppealDecisionExtractor, PatentAppealExtractor, TrademarkAppealDecisionExtractor,
    TrademarkAppealExtractor,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::models::{Category, ClassificationResult, ExtractionConfig, ExtractionRecord};
use crate::schema::{self, ValidationResult};
use crate::text::slugify;

/// Process component of a storage key when no process number was found.
pub const MISSING_PROCESS: &str = "sem_processo";

/// A document handed to an extractor.
#[derive(Debug, Clone)]
pub struct ExtractionInput<'a> {
    /// Full document text.
    pub text: &'a str,
    pub classification: &'a ClassificationResult,
    /// URL of the source PDF, recorded as provenance.
    pub source_url: &'a str,
    /// Fixed processing timestamp; `None` means now.
    pub processed_at: Option<DateTime<Utc>>,
}

impl<'a> ExtractionInput<'a> {
    pub fn new(text: &'a str, classification: &'a ClassificationResult) -> Self {
        Self {
            text,
            classification,
            source_url: "",
            processed_at: None,
        }
    }

    pub fn with_source_url(mut self, source_url: &'a str) -> Self {
        self.source_url = source_url;
        self
    }

    pub fn with_processed_at(mut self, processed_at: DateTime<Utc>) -> Self {
        self.processed_at = Some(processed_at);
        self
    }

    /// Start a record for this document.
    ///
    /// The classified type id wins; `default_type` fills in when the
    /// classifier left it empty.
    pub fn start_record(
        &self,
        category: Category,
        default_type: &str,
        extractor: &str,
    ) -> ExtractionRecord {
        let type_id = if self.classification.type_id.is_empty() {
            default_type
        } else {
            self.classification.type_id.as_str()
        };

        let record = ExtractionRecord::new(self.classification, category, type_id, extractor)
            .with_source_url(self.source_url);

        match self.processed_at {
            Some(at) => record.with_processed_at(at),
            None => record,
        }
    }
}

/// Trait for document extractors.
///
/// Extraction never fails: fields that cannot be found are left `null`.
pub trait DocumentExtractor {
    /// Name recorded in [`ExtractionRecord::extractor`].
    fn name(&self) -> &'static str;

    /// Schema the extractor's records are validated against.
    fn schema_name(&self, category: Category) -> &'static str;

    /// Build the record for a document.
    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord;

    /// Deterministic storage key of a record built by this extractor.
    fn storage_key(&self, record: &ExtractionRecord) -> String;
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub storage_key: String,
    pub record: ExtractionRecord,
    pub validation: ValidationResult,
    /// Non-fatal routing notes (e.g. an unregistered type).
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Build a storage key: `{prefix}_{process}_{slug}[_{petition}]`.
///
/// Every component is slugified; a missing process renders as
/// [`MISSING_PROCESS`] and a missing petition number drops the suffix.
pub fn storage_key(
    category: Category,
    process: Option<&str>,
    slug: &str,
    petition: Option<&str>,
) -> String {
    let process = process
        .map(slugify)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| MISSING_PROCESS.to_string());

    let mut key = format!("{}_{}_{}", category.storage_prefix(), process, slugify(slug));

    if let Some(petition) = petition.map(slugify).filter(|p| !p.is_empty()) {
        key.push('_');
        key.push_str(&petition);
    }

    key
}

/// Name of the schema a record is validated against: its type's schema
/// when the type is registered, else the generic schema of its category.
pub fn schema_name_for(record: &ExtractionRecord) -> &'static str {
    match route(&record.type_id) {
        Some(entry) => entry.schema,
        None => GenericExtractor::new().schema_name(record.category),
    }
}

/// Extract a classified document.
///
/// Fails only on empty text. Types without a registered extractor fall
/// back to the generic extractor with a warning.
pub fn extract(input: &ExtractionInput<'_>, config: &ExtractionConfig) -> Result<ExtractionOutput> {
    if input.text.trim().is_empty() {
        return Err(ExtractionError::InvalidInput("document text is empty".to_string()).into());
    }

    let type_id = input.classification.type_id.as_str();
    let mut warnings = Vec::new();

    let kind = match resolve_extractor(type_id) {
        Some(kind) => kind,
        None if type_id.is_empty() => {
            debug!("no specific type; using generic extractor");
            ExtractorKind::Generic
        }
        None => {
            warn!(type_id = %type_id, "no extractor registered for type; using generic extractor");
            warnings.push(format!(
                "no extractor registered for type '{}'; generic extractor used",
                type_id
            ));
            ExtractorKind::Generic
        }
    };

    let extractor = kind.build(config);
    let record = extractor.extract(input);
    let storage_key = extractor.storage_key(&record);

    let schema = schema::lookup(extractor.schema_name(record.category))?;
    let validation = schema::validate(&record, schema);

    if !validation.valid {
        warn!(
            storage_key = %storage_key,
            errors = validation.errors.len(),
            "record failed validation"
        );
    }

    info!(
        extractor = extractor.name(),
        storage_key = %storage_key,
        filled = validation.filled_field_count,
        total = validation.total_field_count,
        "document extracted"
    );

    Ok(ExtractionOutput {
        storage_key,
        record,
        validation,
        warnings,
    })
}
