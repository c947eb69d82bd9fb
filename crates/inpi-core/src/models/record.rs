//! Extraction record produced for every processed document.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::classification::{Category, ClassificationResult, Sector};

/// Sentinel opening a machine-extracted technical opinion span.
pub const OPINION_START_MARKER: &str = "<<<INICIO_TEXTO_PARECER>>>";

/// Sentinel closing a machine-extracted technical opinion span.
pub const OPINION_END_MARKER: &str = "<<<FIM_TEXTO_PARECER>>>";

/// One entry of a petition's attachment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name as listed (e.g. `procuracao.pdf`).
    pub name: String,
    /// Attachment description / type column.
    pub attachment_type: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, attachment_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attachment_type: attachment_type.into(),
        }
    }
}

/// Value of one extracted field.
///
/// Absence is represented by `Null`, never by an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
    List(Vec<String>),
    Attachments(Vec<Attachment>),
}

impl FieldValue {
    /// Whether the value counts as absent (null, blank text or empty collection).
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Number(_) => false,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Attachments(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "string",
            FieldValue::List(_) | FieldValue::Attachments(_) => "array",
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<Attachment>> for FieldValue {
    fn from(value: Vec<Attachment>) -> Self {
        FieldValue::Attachments(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Fields holding [`FieldValue::Attachments`].
///
/// An empty JSON array is ambiguous under the untagged encoding and reads
/// back as `List`; these names are restored to `Attachments` on load.
pub const ATTACHMENT_FIELDS: &[&str] = &["attachments"];

/// Structured record extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
pub struct ExtractionRecord {
    /// Category the extractor produced the record for.
    pub category: Category,

    /// Sector of the rules that applied.
    pub sector: Sector,

    /// Canonical type id (may be empty for generic records).
    #[serde(rename = "type", default)]
    pub type_id: String,

    /// Reserved subtype id.
    #[serde(rename = "subtype", default)]
    pub subtype_id: String,

    /// Classification confidence copied from the classifier.
    pub confidence: f32,

    /// Type-specific fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,

    /// URL of the source PDF.
    #[serde(default)]
    pub source_url: String,

    /// When the record was produced.
    pub processed_at: DateTime<Utc>,

    /// Identifier of the extractor that built the record.
    pub extractor: String,
}

/// Wire shape of [`ExtractionRecord`], before attachment fields are restored.
#[derive(Deserialize)]
struct RecordWire {
    category: Category,
    sector: Sector,
    #[serde(rename = "type", default)]
    type_id: String,
    #[serde(rename = "subtype", default)]
    subtype_id: String,
    confidence: f32,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    source_url: String,
    processed_at: DateTime<Utc>,
    extractor: String,
}

impl From<RecordWire> for ExtractionRecord {
    fn from(raw: RecordWire) -> Self {
        let mut fields = raw.fields;
        for name in ATTACHMENT_FIELDS {
            if let Some(value) = fields.get_mut(*name) {
                if matches!(value, FieldValue::List(items) if items.is_empty()) {
                    *value = FieldValue::Attachments(Vec::new());
                }
            }
        }

        Self {
            category: raw.category,
            sector: raw.sector,
            type_id: raw.type_id,
            subtype_id: raw.subtype_id,
            confidence: raw.confidence,
            fields,
            source_url: raw.source_url,
            processed_at: raw.processed_at,
            extractor: raw.extractor,
        }
    }
}

impl ExtractionRecord {
    /// Start a record whose metadata is copied from a classification.
    pub fn new(
        classification: &ClassificationResult,
        category: Category,
        type_id: impl Into<String>,
        extractor: impl Into<String>,
    ) -> Self {
        Self {
            category,
            sector: classification.sector,
            type_id: type_id.into(),
            subtype_id: classification.subtype_id.clone(),
            confidence: classification.confidence,
            fields: BTreeMap::new(),
            source_url: String::new(),
            processed_at: Utc::now(),
            extractor: extractor.into(),
        }
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_processed_at(mut self, processed_at: DateTime<Utc>) -> Self {
        self.processed_at = processed_at;
        self
    }

    /// Set a type-specific field.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Text value of a type-specific field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    /// Look up any field by name, metadata and provenance included.
    ///
    /// Unknown names resolve to `Null`.
    pub fn value(&self, name: &str) -> FieldValue {
        match name {
            "category" => FieldValue::Text(self.category.as_str().to_string()),
            "sector" => FieldValue::Text(self.sector.as_str().to_string()),
            "type" => FieldValue::Text(self.type_id.clone()),
            "subtype" => FieldValue::Text(self.subtype_id.clone()),
            "confidence" => FieldValue::Number(self.confidence as f64),
            "source_url" => FieldValue::Text(self.source_url.clone()),
            "processed_at" => FieldValue::Text(
                self.processed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            "extractor" => FieldValue::Text(self.extractor.clone()),
            other => self.fields.get(other).cloned().unwrap_or_default(),
        }
    }
}
