//! Subcommand implementations.

pub mod batch;
pub mod classify;
pub mod config;
pub mod process;
pub mod store;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use inpi_core::models::{InpiConfig, MarkerSet, Sector};

/// `$CONFIG_DIR/inpi/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inpi")
        .join("config.json")
}

/// Load the configuration named by `--config`, else the default file if
/// it exists, else the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InpiConfig> {
    if let Some(path) = config_path {
        return Ok(InpiConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(InpiConfig::from_file(&default_path)?)
    } else {
        Ok(InpiConfig::default())
    }
}

/// Classification flags shared by classify, process and batch.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassificationArgs {
    /// Sector whose rules apply (trademarks, patents)
    #[arg(short, long)]
    pub sector: Option<Sector>,

    /// Require a date/time right after the petition number
    #[arg(long)]
    pub strict: bool,

    /// Use the sector-agnostic official-document markers
    #[arg(long)]
    pub generic: bool,
}

impl ClassificationArgs {
    /// Apply the flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut InpiConfig) {
        if let Some(sector) = self.sector {
            config.classification.sector = sector;
        }
        if self.strict {
            config.classification.strict_petition = true;
        }
        if self.generic {
            config.classification.markers = MarkerSet::Generic;
        }
    }
}

/// Read a document's text (UTF-8, as produced by a PDF-to-text step).
pub fn read_document(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_flags_override_config() {
        let mut config = InpiConfig::default();
        let args = ClassificationArgs {
            sector: Some(Sector::Patents),
            strict: true,
            generic: true,
        };
        args.apply(&mut config);

        assert_eq!(config.classification.sector, Sector::Patents);
        assert!(config.classification.strict_petition);
        assert_eq!(config.classification.markers, MarkerSet::Generic);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = InpiConfig::default();
        config.classification.strict_petition = true;
        config.classification.markers = MarkerSet::Custom(vec!["Despacho".to_string()]);
        let expected = config.clone();

        ClassificationArgs::default().apply(&mut config);
        assert_eq!(config, expected);
    }
}
