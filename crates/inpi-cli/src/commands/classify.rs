//! Classify command - report a document's category and type.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use inpi_core::classifier::DocumentClassifier;

use super::{load_config, read_document, ClassificationArgs};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    classification: ClassificationArgs,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.classification.apply(&mut config);

    let text = read_document(&args.input)?;
    info!("Classifying file: {}", args.input.display());

    let classifier = DocumentClassifier::from_config(&config.classification);

    let result = classifier.classify(&text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
