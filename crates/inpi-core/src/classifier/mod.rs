//! Two-stage document classification: category, then type.

pub mod category;
pub mod types;

pub use category::{CategoryClassifier, CategoryRules, CATEGORY_CONFIDENCE, CATEGORY_WINDOW_CHARS};
pub use types::{ConfidenceModel, TypeClassifier, TypeMatch, TypeRule};

use tracing::{debug, info};

use crate::error::{ClassificationError, Result};
use crate::models::{ClassificationConfig, ClassificationResult, MarkerSet, Sector};

/// Classifier combining the category and type stages for one sector.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    category: CategoryClassifier,
    types: TypeClassifier,
}

impl DocumentClassifier {
    /// Classifier using the sector's own category markers.
    pub fn new(sector: Sector) -> Self {
        Self::with_rules(CategoryRules::for_sector(sector))
    }

    /// Classifier using the sector-agnostic category markers.
    pub fn generic(sector: Sector) -> Self {
        Self::with_rules(CategoryRules::generic(sector))
    }

    pub fn with_rules(rules: CategoryRules) -> Self {
        let types = TypeClassifier::new(rules.sector());
        Self {
            category: CategoryClassifier::new(rules),
            types,
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &ClassificationConfig) -> Self {
        let rules = match &config.markers {
            MarkerSet::Sector => CategoryRules::for_sector(config.sector),
            MarkerSet::Generic => CategoryRules::generic(config.sector),
            MarkerSet::Custom(phrases) => {
                let phrases: Vec<&str> = phrases.iter().map(String::as_str).collect();
                CategoryRules::with_markers(config.sector, &phrases)
            }
        };
        Self::with_rules(rules.with_strict_petition(config.strict_petition))
    }

    pub fn with_type_classifier(mut self, types: TypeClassifier) -> Self {
        self.types = types;
        self
    }

    pub fn sector(&self) -> Sector {
        self.category.rules().sector()
    }

    /// Classify a document.
    ///
    /// Fails only when `text` is empty or whitespace-only.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult> {
        if text.trim().is_empty() {
            return Err(ClassificationError::InvalidInput(
                "document text is empty".to_string(),
            )
            .into());
        }

        debug!(chars = text.chars().count(), sector = %self.sector(), "classifying document");

        let (category, confidence) = self.category.classify(text);
        let found = self.types.classify(text, category);

        let result = ClassificationResult {
            category,
            type_id: found.type_id,
            subtype_id: String::new(),
            confidence,
            type_confidence: found.confidence,
            original_type: found.label,
            sector: self.sector(),
        };

        info!(
            category = %result.category,
            type_id = %result.type_id,
            original_type = %result.original_type,
            confidence = result.confidence,
            "document classified"
        );

        Ok(result)
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(Sector::default())
    }
}
