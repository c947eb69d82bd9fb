//! Declarative record schemas and validation.
//!
//! A schema lists the fields a record of one type is expected to carry.
//! Validation never fails: problems are reported in [`ValidationResult`].

mod definitions;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::SchemaError;
use crate::models::ExtractionRecord;

pub use definitions::SCHEMAS;

/// Expected shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Array,
}

impl FieldType {
    /// Name matching [`crate::models::FieldValue::kind`].
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Array => "array",
        }
    }
}

/// Constraints on one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Absence is an error.
    pub required: bool,

    /// Absence is a warning.
    pub recommended: bool,

    /// Applied to string values.
    #[serde(serialize_with = "serialize_pattern", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Regex>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Value the extractor always writes (documentation only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

fn serialize_pattern<S: Serializer>(
    pattern: &Option<Regex>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match pattern {
        Some(re) => serializer.serialize_some(re.as_str()),
        None => serializer.serialize_none(),
    }
}

impl FieldSpec {
    fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            recommended: false,
            pattern: None,
            min: None,
            max: None,
            default: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn array(name: &'static str) -> Self {
        Self::new(name, FieldType::Array)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Named field list for one record type.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

/// Outcome of validating a record against a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// No errors were found.
    pub valid: bool,
    pub errors: Vec<String>,
    /// Schema fields that are null or empty, required or not.
    pub missing_fields: Vec<String>,
    pub filled_field_count: usize,
    pub total_field_count: usize,
    /// Non-fatal notes (unfilled recommended fields).
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Share of schema fields that are filled (0.0 - 1.0).
    pub fn fill_ratio(&self) -> f32 {
        if self.total_field_count == 0 {
            return 0.0;
        }
        self.filled_field_count as f32 / self.total_field_count as f32
    }
}

/// Find a schema by name.
pub fn lookup(name: &str) -> std::result::Result<&'static Schema, SchemaError> {
    SCHEMAS
        .get(name)
        .ok_or_else(|| SchemaError::Unknown(name.to_string()))
}

/// Names of every registered schema, sorted.
pub fn schema_names() -> Vec<&'static str> {
    SCHEMAS.keys().copied().collect()
}

/// Validate a record against a schema.
///
/// Empty required fields are errors, empty recommended fields are
/// warnings and every empty field is listed as missing. Filled fields are
/// checked for type, then pattern (strings) or range (numbers).
pub fn validate(record: &ExtractionRecord, schema: &Schema) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing_fields = Vec::new();
    let mut filled = 0;

    for spec in &schema.fields {
        let value = record.value(spec.name);

        if value.is_empty() {
            missing_fields.push(spec.name.to_string());
            if spec.required {
                errors.push(format!("missing required field: {}", spec.name));
            } else if spec.recommended {
                warnings.push(format!("recommended field not filled: {}", spec.name));
            }
            continue;
        }

        filled += 1;

        if value.kind() != spec.field_type.as_str() {
            errors.push(format!(
                "field {} must be {}, found {}",
                spec.name,
                spec.field_type.as_str(),
                value.kind()
            ));
            continue;
        }

        if let (Some(pattern), Some(text)) = (&spec.pattern, value.as_text()) {
            if !pattern.is_match(text) {
                errors.push(format!(
                    "field {} does not match pattern {}",
                    spec.name,
                    pattern.as_str()
                ));
            }
        }

        if let Some(number) = value.as_number() {
            if let Some(min) = spec.min {
                if number < min {
                    errors.push(format!("field {} must be >= {}", spec.name, min));
                }
            }
            if let Some(max) = spec.max {
                if number > max {
                    errors.push(format!("field {} must be <= {}", spec.name, max));
                }
            }
        }
    }

    debug!(
        schema = schema.name,
        errors = errors.len(),
        missing = missing_fields.len(),
        "record validated"
    );

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        missing_fields,
        filled_field_count: filled,
        total_field_count: schema.fields.len(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ClassificationResult, FieldValue, Sector};
    use pretty_assertions::assert_eq;

    const APPEAL: &str = "recursoIndeferimentoPedidoRegistro";

    fn petition_record() -> ExtractionRecord {
        let classification = ClassificationResult {
            category: Category::Petition,
            type_id: APPEAL.to_string(),
            subtype_id: String::new(),
            confidence: 0.85,
            type_confidence: 0.7,
            original_type: "RECURSO_INDEFERIMENTO".to_string(),
            sector: Sector::Trademarks,
        };
        let mut record =
            ExtractionRecord::new(&classification, Category::Petition, APPEAL, "TrademarkAppealExtractor");
        record.set("petition_number", "850240123456");
        record.set("process_number", "912345678");
        record.set("applicant_name", "ACME LTDA");
        record.set("applicant_state", "SP");
        record.set("full_text", "Petição de Marca 850240123456");
        record
    }

    #[test]
    fn test_complete_record_is_valid() {
        let record = petition_record();
        let result = validate(&record, lookup(APPEAL).unwrap());

        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
        assert!(result.filled_field_count <= result.total_field_count);
        assert!(result.missing_fields.contains(&"attorney_name".to_string()));
        assert!(!result.missing_fields.contains(&"petition_number".to_string()));
    }

    #[test]
    fn test_missing_required_field() {
        let mut record = petition_record();
        record.set("petition_number", FieldValue::Null);

        let result = validate(&record, lookup(APPEAL).unwrap());

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["missing required field: petition_number"]);
        assert!(result.missing_fields.contains(&"petition_number".to_string()));
    }

    #[test]
    fn test_pattern_and_range_violations() {
        let mut record = petition_record();
        record.set("petition_number", "85024012345");
        record.set("applicant_state", "São Paulo");
        record.confidence = 1.5;

        let result = validate(&record, lookup(APPEAL).unwrap());

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.iter().any(|e| e.starts_with("field petition_number does not match")));
        assert!(result.errors.iter().any(|e| e.starts_with("field applicant_state does not match")));
        assert!(result.errors.contains(&"field confidence must be <= 1".to_string()));
    }

    #[test]
    fn test_unfilled_recommended_field_is_a_warning() {
        let mut record = petition_record();
        record.set("applicant_name", FieldValue::Null);

        let result = validate(&record, lookup(APPEAL).unwrap());

        assert!(result.valid);
        assert_eq!(result.warnings, vec!["recommended field not filled: applicant_name"]);
    }

    #[test]
    fn test_type_mismatch() {
        let mut record = petition_record();
        record.set("attachments", "procuracao.pdf");

        let result = validate(&record, lookup(APPEAL).unwrap());

        assert_eq!(result.errors, vec!["field attachments must be array, found string"]);
    }

    #[test]
    fn test_category_is_checked() {
        let mut record = petition_record();
        record.category = Category::OfficialDocument;

        let result = validate(&record, lookup(APPEAL).unwrap());
        assert!(result.errors.iter().any(|e| e.starts_with("field category")));
    }

    #[test]
    fn test_unknown_schema() {
        assert_eq!(
            lookup("pet_oposicao").unwrap_err(),
            SchemaError::Unknown("pet_oposicao".to_string())
        );
    }

    #[test]
    fn test_registered_names() {
        let names = schema_names();
        for name in ["generico", "generico_peticao", "generico_doc_oficial", APPEAL] {
            assert!(names.contains(&name), "missing schema {}", name);
        }
        assert_eq!(lookup(APPEAL).unwrap().name, APPEAL);
    }

    #[test]
    fn test_fill_ratio() {
        let result = ValidationResult {
            filled_field_count: 3,
            total_field_count: 12,
            ..Default::default()
        };
        assert_eq!(result.fill_ratio(), 0.25);
        assert_eq!(ValidationResult::default().fill_ratio(), 0.0);
    }

    #[test]
    fn test_schema_serializes_patterns() {
        let json = serde_json::to_value(lookup(APPEAL).unwrap()).unwrap();
        let petition = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "petition_number")
            .unwrap();

        assert_eq!(petition["type"], "string");
        assert_eq!(petition["required"], true);
        assert_eq!(petition["pattern"], r"^[0-9]{12}$");
    }
}
