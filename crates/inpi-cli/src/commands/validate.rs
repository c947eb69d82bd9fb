//! Validate command - check an extracted record against a schema.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;

use inpi_core::models::ExtractionRecord;
use inpi_core::schema::{self, ValidationResult};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Record JSON file (stored record, process output or bare record)
    #[arg(required_unless_present_any = ["schema", "list_schemas"])]
    record: Option<PathBuf>,

    /// Schema name (default: the schema of the record's type)
    #[arg(long)]
    schema: Option<String>,

    /// List the available schemas
    #[arg(long)]
    list_schemas: bool,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    schema: &'a str,
    #[serde(rename = "type")]
    type_id: &'a str,
    validation: ValidationResult,
}

pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    if args.list_schemas {
        for name in schema::schema_names() {
            let schema = schema::lookup(name)?;
            println!("{:<40} {}", name, schema.description);
        }
        return Ok(());
    }

    let Some(record_path) = &args.record else {
        // Schema only: print its definition
        let name = args.schema.as_deref().unwrap_or_default();
        let schema = schema::lookup(name)?;
        println!("{}", serde_json::to_string_pretty(schema)?);
        return Ok(());
    };

    let record = load_record(record_path)?;
    let schema_name = match &args.schema {
        Some(name) => name.as_str(),
        None => inpi_core::schema_name_for(&record),
    };
    let schema = schema::lookup(schema_name)?;
    let validation = schema::validate(&record, schema);
    let valid = validation.valid;

    let report = ValidationReport {
        schema: schema.name,
        type_id: &record.type_id,
        validation,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !valid {
        eprintln!("{} Record does not satisfy {}", style("✗").red(), schema.name);
        anyhow::bail!("validation failed");
    }

    Ok(())
}

/// Read a record from any of the JSON shapes the CLI writes.
fn load_record(path: &Path) -> anyhow::Result<ExtractionRecord> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let nested = match (value.get("extraction"), value.get("record")) {
        (Some(extraction), _) => extraction.get("record").cloned(),
        (None, Some(record)) => Some(record.clone()),
        (None, None) => None,
    };
    let record_value = nested.unwrap_or(value);

    serde_json::from_value(record_value)
        .map_err(|e| anyhow::anyhow!("{} does not hold an extraction record: {}", path.display(), e))
}
