//! Batch processing command for multiple documents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use inpi_core::pipeline::{DocumentPipeline, PipelineOutput};
use inpi_core::storage::{DirectoryStore, RecordStore, StoredRecord};

use super::{load_config, read_document, ClassificationArgs};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (text files)
    #[arg(required = true)]
    input: String,

    #[command(flatten)]
    classification: ClassificationArgs,

    /// Store records in this directory (default: configured directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Do not store records
    #[arg(long, conflicts_with = "store")]
    no_store: bool,

    /// Write a summary CSV to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    output: Option<PipelineOutput>,
    error: Option<String>,
    processing_time_ms: u64,
    /// Earlier file in this run whose record had the same storage key.
    replaces: Option<PathBuf>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.classification.apply(&mut config);

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let mut store = if args.no_store {
        None
    } else {
        let dir = args
            .store
            .clone()
            .unwrap_or_else(|| config.storage.directory.clone());
        Some(DirectoryStore::open(dir)?)
    };

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Extraction is CPU-bound and synchronous: fan out over blocking
    // tasks, at most `jobs` at a time.
    let pipeline = Arc::new(DocumentPipeline::from_config(&config));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let pipeline = Arc::clone(&pipeline);

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let result = process_single_file(&pipeline, &path);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;

            match result {
                Ok(output) => FileResult {
                    path,
                    output: Some(output),
                    error: None,
                    processing_time_ms,
                    replaces: None,
                },
                Err(e) => FileResult {
                    path,
                    output: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                    replaces: None,
                },
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    let mut seen_keys: HashMap<String, PathBuf> = HashMap::new();
    for handle in handles {
        let mut result = handle.await?;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }

        if let Some(output) = &result.output {
            let key = output.storage_key().to_string();
            if let Some(previous) = seen_keys.insert(key, result.path.clone()) {
                warn!(
                    "{} has the same storage key as {} ({}); the later record replaces it",
                    result.path.display(),
                    previous.display(),
                    output.storage_key()
                );
                result.replaces = Some(previous);
            }
        }

        // Stores are single-writer; records are put from this task only
        if let (Some(store), Some(output)) = (store.as_mut(), &result.output) {
            store.put(StoredRecord::from(output.extraction.clone()))?;
            debug!("Stored {}", output.storage_key());
        }

        results.push(result);
        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.output.is_some()).count();
    let review = results
        .iter()
        .filter(|r| r.output.as_ref().is_some_and(|o| o.needs_review()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let collisions = results.iter().filter(|r| r.replaces.is_some()).count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} need review), {} failed",
        style(successful).green(),
        style(review).yellow(),
        style(failed.len()).red()
    );
    if collisions > 0 {
        println!(
            "   {} storage key collisions (later files replaced earlier records)",
            style(collisions).yellow()
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(pipeline: &DocumentPipeline, path: &Path) -> anyhow::Result<PipelineOutput> {
    let text = read_document(path)?;
    let source_url = path.display().to_string();
    Ok(pipeline.process(&text, &source_url)?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "storage_key",
        "category",
        "type",
        "confidence",
        "valid",
        "filled_fields",
        "total_fields",
        "processing_time_ms",
        "replaces",
        "error",
    ])?;

    for result in results {
        let filename = file_name(&result.path);
        let replaces = result.replaces.as_deref().map(file_name).unwrap_or("");

        if let Some(output) = &result.output {
            let validation = &output.extraction.validation;
            wtr.write_record([
                filename,
                "success",
                output.storage_key(),
                output.classification.category.as_str(),
                output.extraction.record.type_id.as_str(),
                format!("{:.2}", output.classification.confidence).as_str(),
                if validation.valid { "true" } else { "false" },
                validation.filled_field_count.to_string().as_str(),
                validation.total_field_count.to_string().as_str(),
                result.processing_time_ms.to_string().as_str(),
                replaces,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                result.processing_time_ms.to_string().as_str(),
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}
