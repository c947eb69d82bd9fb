//! Configuration structures for the classification pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::classification::Sector;
use crate::error::{InpiError, Result};

/// Main configuration for the inpi pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InpiConfig {
    /// Classification configuration.
    pub classification: ClassificationConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Record storage configuration.
    pub storage: StorageConfig,
}

/// Category/type classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Sector whose rule set is applied.
    pub sector: Sector,

    /// Require a `DD/MM/YYYY HH:MM` token right after the 17-digit
    /// petition number.
    pub strict_petition: bool,

    /// Official-document marker phrases.
    pub markers: MarkerSet,
}

/// Which official-document marker phrases the category stage looks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSet {
    /// The configured sector's own phrases.
    #[default]
    Sector,
    /// Trademark phrases plus the full institutional header.
    Generic,
    /// An explicit phrase list; empty disables official-document detection.
    Custom(Vec<String>),
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Header window size (chars) when the declaration marker is absent.
    pub header_window_chars: usize,

    /// Article numbers dropped from cited-article lists.
    pub excluded_articles: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_window_chars: 2000,
            // Procedural articles cited by every decision
            excluded_articles: vec!["212".to_string(), "169".to_string()],
        }
    }
}

/// Record storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory used by the directory-backed record store.
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("records"),
        }
    }
}

impl InpiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InpiError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
