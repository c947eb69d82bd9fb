//! Built-in schemas: one per registered type plus the generic fallbacks.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldSpec, Schema};

const DISPATCH_TYPE: &str = "Recurso não provido";
const DECISION: &str = "indeferido_mantido";

lazy_static! {
    static ref PETITION_CATEGORY: Regex = Regex::new(r"^petition$").unwrap();
    static ref OFFICIAL_CATEGORY: Regex = Regex::new(r"^official_document$").unwrap();

    static ref PETITION_NUMBER: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
    static ref TRADEMARK_PROCESS: Regex = Regex::new(r"^[0-9]{9}$").unwrap();
    static ref PATENT_PROCESS: Regex = Regex::new(
        r"^(BR\s*[0-9]{2}\s*[0-9]{4}\s*[0-9]{6}[-\s]?[0-9]?|[0-9]{9})$"
    ).unwrap();
    static ref OUR_NUMBER: Regex = Regex::new(r"^[0-9]{17}$").unwrap();
    static ref CPF: Regex = Regex::new(r"^[0-9]{11}$").unwrap();
    static ref UF: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[\w.\-]+@[\w.\-]+$").unwrap();
    static ref DATE: Regex = Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap();
    static ref DATE_TIME: Regex = Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}( [0-9]{2}:[0-9]{2})?$").unwrap();
    static ref ISO_TIMESTAMP: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}"
    ).unwrap();

    /// Every built-in schema by name.
    pub static ref SCHEMAS: BTreeMap<&'static str, Schema> = {
        let mut schemas = BTreeMap::new();
        for schema in [
            trademark_appeal(),
            trademark_appeal_decision(),
            patent_appeal(),
            patent_appeal_decision(),
            generic_petition(),
            generic_official_document(),
            generic(),
        ] {
            schemas.insert(schema.name, schema);
        }
        schemas
    };
}

/// Classification metadata, optionally pinned to one category.
fn metadata(category: Option<&Regex>) -> Vec<FieldSpec> {
    let mut category_field = FieldSpec::text("category").required();
    if let Some(pattern) = category {
        category_field = category_field.with_pattern(pattern.clone());
    }

    vec![
        category_field,
        FieldSpec::text("type").required(),
        FieldSpec::text("subtype"),
        FieldSpec::number("confidence").required().with_range(0.0, 1.0),
    ]
}

fn provenance() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("full_text").required(),
        FieldSpec::text("source_url"),
        FieldSpec::text("processed_at")
            .required()
            .with_pattern(ISO_TIMESTAMP.clone()),
        FieldSpec::text("extractor"),
    ]
}

/// Identification, applicant and attorney blocks shared by both forms.
fn petition_fields(process: &Regex) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("petition_number")
            .required()
            .with_pattern(PETITION_NUMBER.clone()),
        FieldSpec::text("process_number")
            .required()
            .with_pattern(process.clone()),
        FieldSpec::text("our_number").with_pattern(OUR_NUMBER.clone()),
        FieldSpec::text("petition_date").with_pattern(DATE_TIME.clone()),
        FieldSpec::text("applicant_name").recommended(),
        FieldSpec::text("applicant_document"),
        FieldSpec::text("applicant_address"),
        FieldSpec::text("applicant_city"),
        FieldSpec::text("applicant_state").with_pattern(UF.clone()),
        FieldSpec::text("applicant_zip"),
        FieldSpec::text("applicant_country"),
        FieldSpec::text("applicant_legal_nature"),
        FieldSpec::text("applicant_email").with_pattern(EMAIL.clone()),
        FieldSpec::text("attorney_name"),
        FieldSpec::text("attorney_cpf").with_pattern(CPF.clone()),
        FieldSpec::text("attorney_email").with_pattern(EMAIL.clone()),
        FieldSpec::text("attorney_api_number"),
        FieldSpec::text("attorney_oab_number"),
        FieldSpec::text("attorney_uf").with_pattern(UF.clone()),
        FieldSpec::text("firm_name"),
        FieldSpec::text("firm_cnpj"),
        FieldSpec::array("attachments"),
    ]
}

/// Decision constants and the lists every appeal decision carries.
fn decision_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("dispatch_type")
            .required()
            .with_default(DISPATCH_TYPE),
        FieldSpec::text("decision").required().with_default(DECISION),
        FieldSpec::text("denial_reason"),
        FieldSpec::array("cited_articles"),
        FieldSpec::array("prior_marks"),
        FieldSpec::array("conflicting_processes"),
    ]
}

fn build(
    name: &'static str,
    description: &'static str,
    groups: Vec<Vec<FieldSpec>>,
) -> Schema {
    Schema {
        name,
        description,
        fields: groups.into_iter().flatten().collect(),
    }
}

fn trademark_appeal() -> Schema {
    build(
        "recursoIndeferimentoPedidoRegistro",
        "Trademark appeal against refusal (e-Marcas petition)",
        vec![
            metadata(Some(&*PETITION_CATEGORY)),
            petition_fields(&TRADEMARK_PROCESS),
            vec![FieldSpec::text("petition_text")],
            provenance(),
        ],
    )
}

fn patent_appeal() -> Schema {
    build(
        "recursoIndeferimentoPedidoPatente",
        "Patent appeal against refusal (e-Patentes petition)",
        vec![
            metadata(Some(&*PETITION_CATEGORY)),
            petition_fields(&PATENT_PROCESS),
            provenance(),
        ],
    )
}

fn trademark_appeal_decision() -> Schema {
    build(
        "recursoIndeferimentoNaoProvido",
        "Trademark appeal denied, refusal upheld",
        vec![
            metadata(Some(&*OFFICIAL_CATEGORY)),
            vec![
                FieldSpec::text("process_number")
                    .required()
                    .with_pattern(TRADEMARK_PROCESS.clone()),
                FieldSpec::text("dispatch_date").with_pattern(DATE.clone()),
                FieldSpec::text("petition_name"),
                FieldSpec::text("protocol_number"),
                FieldSpec::text("filing_date").with_pattern(DATE.clone()),
                FieldSpec::text("applicant"),
                FieldSpec::text("denial_notification_date").with_pattern(DATE.clone()),
                FieldSpec::text("decision_name"),
                FieldSpec::text("opinion_date").with_pattern(DATE.clone()),
                FieldSpec::text("opinion_number"),
                FieldSpec::text("automatic_text_1"),
                FieldSpec::text("automatic_text_2"),
                FieldSpec::text("opinion_text"),
                FieldSpec::text("examiner"),
            ],
            decision_fields(),
            provenance(),
        ],
    )
}

fn patent_appeal_decision() -> Schema {
    build(
        "recursoIndeferimentoNaoProvidoPatente",
        "Patent appeal denied, refusal upheld",
        vec![
            metadata(Some(&*OFFICIAL_CATEGORY)),
            vec![
                FieldSpec::text("process_number")
                    .required()
                    .with_pattern(PATENT_PROCESS.clone()),
                FieldSpec::text("pct_number"),
                FieldSpec::text("filing_date").with_pattern(DATE.clone()),
                FieldSpec::text("unionist_priority"),
                FieldSpec::text("applicant_name"),
                FieldSpec::text("inventor_name"),
                FieldSpec::text("title"),
                FieldSpec::text("automatic_text_1"),
                FieldSpec::text("automatic_text_2"),
                FieldSpec::text("dispatch_date").with_pattern(DATE.clone()),
                FieldSpec::text("denial_notification_date").with_pattern(DATE.clone()),
                FieldSpec::text("decision_name"),
                FieldSpec::text("decision_text"),
                FieldSpec::text("opinion_text"),
                FieldSpec::text("examiner"),
            ],
            decision_fields(),
            provenance(),
        ],
    )
}

fn generic_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("process_number").recommended(),
        FieldSpec::text("petition_number").with_pattern(PETITION_NUMBER.clone()),
        FieldSpec::text("date").with_pattern(DATE.clone()),
        FieldSpec::array("cited_articles"),
        FieldSpec::array("related_processes"),
        FieldSpec::text("original_type"),
    ]
}

fn generic_petition() -> Schema {
    build(
        "generico_peticao",
        "Petition without a dedicated extractor",
        vec![metadata(Some(&*PETITION_CATEGORY)), generic_fields(), provenance()],
    )
}

fn generic_official_document() -> Schema {
    build(
        "generico_doc_oficial",
        "Official document without a dedicated extractor",
        vec![metadata(Some(&*OFFICIAL_CATEGORY)), generic_fields(), provenance()],
    )
}

fn generic() -> Schema {
    build(
        "generico",
        "Document of unknown category",
        vec![metadata(None), generic_fields(), provenance()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_unique() {
        for schema in SCHEMAS.values() {
            let mut names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field in {}", schema.name);
        }
    }

    #[test]
    fn test_every_schema_requires_provenance() {
        for schema in SCHEMAS.values() {
            let required: Vec<_> = schema.required_fields().map(|f| f.name).collect();
            for name in ["category", "type", "confidence", "full_text", "processed_at"] {
                assert!(required.contains(&name), "{} does not require {}", schema.name, name);
            }
        }
    }

    #[test]
    fn test_patent_process_pattern() {
        let spec = SCHEMAS["recursoIndeferimentoNaoProvidoPatente"]
            .field("process_number")
            .unwrap();
        let pattern = spec.pattern.as_ref().unwrap();

        assert!(pattern.is_match("BR1020140042067"));
        assert!(pattern.is_match("BR 10 2014 004206-7"));
        assert!(pattern.is_match("912345678"));
        assert!(!pattern.is_match("10 2014 004206 7"));
    }

    #[test]
    fn test_decision_defaults() {
        let schema = &SCHEMAS["recursoIndeferimentoNaoProvido"];
        assert_eq!(schema.field("decision").unwrap().default, Some(DECISION));
        assert_eq!(schema.field("dispatch_type").unwrap().default, Some(DISPATCH_TYPE));
    }
}
