//! WASM bindings for INPI filing classification and extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use inpi_core::extract::registered_types_for;
use inpi_core::models::{
    Category, ClassificationConfig, ExtractionConfig, ExtractionRecord, MarkerSet, Sector,
};
use inpi_core::schema::{self, ValidationResult};
use inpi_core::{DocumentClassifier, DocumentPipeline, ExtractionInput};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_sector(sector: Option<String>) -> Result<Sector, JsValue> {
    match sector {
        Some(s) => s.parse().map_err(js_error),
        None => Ok(Sector::default()),
    }
}

/// Validate a JSON-encoded record against a schema, defaulting to the
/// schema its type routes to.
fn validate_json(record_json: &str, schema_name: Option<&str>) -> Result<ValidationResult, String> {
    let record: ExtractionRecord =
        serde_json::from_str(record_json).map_err(|e| format!("invalid record: {}", e))?;
    let name = schema_name.unwrap_or_else(|| inpi_core::schema_name_for(&record));
    let schema = schema::lookup(name).map_err(|e| e.to_string())?;
    Ok(schema::validate(&record, schema))
}

/// Classify document text.
///
/// `sector` is "trademarks" (default) or "patents".
#[wasm_bindgen(js_name = classifyText)]
pub fn classify_text(text: &str, sector: Option<String>) -> Result<JsValue, JsValue> {
    let classifier = DocumentClassifier::new(parse_sector(sector)?);
    let result = classifier.classify(text).map_err(js_error)?;
    to_js(&result)
}

/// Classify and extract a document, returning the record with its
/// storage key and validation result.
#[wasm_bindgen(js_name = extractDocument)]
pub fn extract_document(
    text: &str,
    sector: Option<String>,
    source_url: Option<String>,
) -> Result<JsValue, JsValue> {
    let classifier = DocumentClassifier::new(parse_sector(sector)?);
    let classification = classifier.classify(text).map_err(js_error)?;
    let source_url = source_url.unwrap_or_default();

    let input = ExtractionInput::new(text, &classification).with_source_url(&source_url);
    let output = inpi_core::extract(&input, &ExtractionConfig::default()).map_err(js_error)?;
    to_js(&output)
}

/// Run the full pipeline: classification, extraction and validation.
#[wasm_bindgen(js_name = processDocument)]
pub fn process_document(
    text: &str,
    sector: Option<String>,
    source_url: Option<String>,
) -> Result<JsValue, JsValue> {
    let pipeline = DocumentPipeline::new(DocumentClassifier::new(parse_sector(sector)?));
    let output = pipeline
        .process(text, source_url.as_deref().unwrap_or_default())
        .map_err(js_error)?;
    to_js(&output)
}

/// Validate a JSON-encoded record.
#[wasm_bindgen(js_name = validateRecord)]
pub fn validate_record(record_json: &str, schema_name: Option<String>) -> Result<JsValue, JsValue> {
    let result = validate_json(record_json, schema_name.as_deref()).map_err(js_error)?;
    to_js(&result)
}

/// Type ids with a dedicated extractor in one category.
#[wasm_bindgen(js_name = registeredTypes)]
pub fn registered_types(category: &str) -> Result<js_sys::Array, JsValue> {
    let category = match category {
        "petition" => Category::Petition,
        "official_document" => Category::OfficialDocument,
        other => return Err(js_error(format!("unknown category: {}", other))),
    };

    Ok(registered_types_for(category)
        .into_iter()
        .map(JsValue::from_str)
        .collect())
}

/// Names of every built-in schema.
#[wasm_bindgen(js_name = schemaNames)]
pub fn schema_names() -> js_sys::Array {
    schema::schema_names().into_iter().map(JsValue::from_str).collect()
}

/// Reusable processor for browser use.
#[wasm_bindgen]
pub struct DocumentProcessor {
    classification: ClassificationConfig,
    extraction: ExtractionConfig,
}

#[wasm_bindgen]
impl DocumentProcessor {
    /// Create a processor for the trademark sector.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            classification: ClassificationConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }

    /// Select the sector ("trademarks" or "patents").
    #[wasm_bindgen(js_name = setSector)]
    pub fn set_sector(&mut self, sector: &str) -> Result<(), JsValue> {
        self.classification.sector = sector.parse().map_err(js_error)?;
        Ok(())
    }

    /// Require a date/time token after the petition number.
    #[wasm_bindgen(js_name = setStrictPetition)]
    pub fn set_strict_petition(&mut self, strict: bool) {
        self.classification.strict_petition = strict;
    }

    /// Use the sector-agnostic official-document markers.
    #[wasm_bindgen(js_name = setGenericMarkers)]
    pub fn set_generic_markers(&mut self, generic: bool) {
        self.classification.markers = if generic {
            MarkerSet::Generic
        } else {
            MarkerSet::Sector
        };
    }

    /// Look for these phrases instead of the built-in markers.
    #[wasm_bindgen(js_name = setMarkers)]
    pub fn set_markers(&mut self, phrases: Vec<String>) {
        self.classification.markers = MarkerSet::Custom(phrases);
    }

    #[wasm_bindgen(getter)]
    pub fn sector(&self) -> String {
        self.classification.sector.to_string()
    }

    fn pipeline(&self) -> DocumentPipeline {
        DocumentPipeline::new(DocumentClassifier::from_config(&self.classification))
            .with_extraction_config(self.extraction.clone())
    }

    /// Classify document text.
    #[wasm_bindgen]
    pub fn classify(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = DocumentClassifier::from_config(&self.classification)
            .classify(text)
            .map_err(js_error)?;
        to_js(&result)
    }

    /// Process document text end to end.
    #[wasm_bindgen]
    pub fn process(&self, text: &str, source_url: Option<String>) -> Result<JsValue, JsValue> {
        let output = self
            .pipeline()
            .process(text, source_url.as_deref().unwrap_or_default())
            .map_err(js_error)?;
        to_js(&output)
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}



#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_classify_rejects_empty_text() {
        assert!(classify_text("   ", None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_sector() {
        assert!(classify_text("Processo 912345678", Some("design".to_string())).is_err());
    }

    #[wasm_bindgen_test]
    fn test_processor_sector() {
        let mut processor = DocumentProcessor::new();
        assert_eq!(processor.sector(), "trademarks");
        processor.set_sector("patentes").unwrap();
        assert_eq!(processor.sector(), "patents");
    }

    #[wasm_bindgen_test]
    fn test_registered_types() {
        assert!(registered_types("petition").unwrap().length() > 0);
        assert!(registered_types("unknown").is_err());
    }
}
