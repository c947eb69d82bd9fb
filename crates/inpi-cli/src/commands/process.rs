//! Process command - classify, extract and validate a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use inpi_core::models::FieldValue;
use inpi_core::pipeline::{DocumentPipeline, PipelineOutput};
use inpi_core::storage::DirectoryStore;

use super::{load_config, read_document, ClassificationArgs};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    classification: ClassificationArgs,

    /// URL of the source PDF, recorded in the record
    #[arg(long)]
    source_url: Option<String>,

    /// Store the record in this directory
    #[arg(long)]
    store: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.classification.apply(&mut config);

    let text = read_document(&args.input)?;
    let source_url = args
        .source_url
        .clone()
        .unwrap_or_else(|| args.input.display().to_string());

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Extracting fields...");

    let pipeline = DocumentPipeline::from_config(&config);
    let output = match &args.store {
        Some(dir) => {
            let mut store = DirectoryStore::open(dir)?;
            pipeline.process_and_store(&text, &source_url, &mut store)?
        }
        None => pipeline.process(&text, &source_url)?,
    };

    pb.finish_and_clear();

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output)?,
        OutputFormat::Text => format_text(&output),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    if let Some(dir) = &args.store {
        eprintln!(
            "{} Stored {} in {}",
            style("✓").green(),
            output.storage_key(),
            dir.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Longest value shown per field in the text summary.
const PREVIEW_CHARS: usize = 80;

pub fn format_text(output: &PipelineOutput) -> String {
    let classification = &output.classification;
    let record = &output.extraction.record;
    let validation = &output.extraction.validation;

    let mut out = String::new();

    out.push_str(&format!(
        "Category:    {} ({:.0}%)\n",
        classification.category,
        classification.confidence * 100.0
    ));
    out.push_str(&format!(
        "Type:        {} ({})\n",
        if record.type_id.is_empty() { "-" } else { record.type_id.as_str() },
        classification.original_type
    ));
    out.push_str(&format!("Extractor:   {}\n", record.extractor));
    out.push_str(&format!("Storage key: {}\n", output.storage_key()));
    out.push_str(&format!(
        "Validation:  {}, {}/{} fields filled\n",
        if validation.valid { "valid" } else { "needs review" },
        validation.filled_field_count,
        validation.total_field_count
    ));

    for error in &validation.errors {
        out.push_str(&format!("  error: {}\n", error));
    }
    for warning in validation.warnings.iter().chain(&output.extraction.warnings) {
        out.push_str(&format!("  warning: {}\n", warning));
    }

    out.push_str("\nFields:\n");
    for (name, value) in &record.fields {
        if name == "full_text" || value.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}: {}\n", name, preview(value)));
    }

    out
}

fn preview(value: &FieldValue) -> String {
    let full = match value {
        FieldValue::Null => String::new(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => s.split_whitespace().collect::<Vec<_>>().join(" "),
        FieldValue::List(items) => items.join(", "),
        FieldValue::Attachments(items) => items
            .iter()
            .map(|a| format!("{} ({})", a.name, a.attachment_type))
            .collect::<Vec<_>>()
            .join(", "),
    };

    if full.chars().count() > PREVIEW_CHARS {
        let cut: String = full.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        full
    }
}
