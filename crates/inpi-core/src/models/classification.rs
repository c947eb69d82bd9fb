//! Classification models shared by the classifier, router and extractors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level document category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Filing submitted by a private party (petição).
    Petition,
    /// Decision or notice issued by the office (despacho, parecer, intimação).
    OfficialDocument,
    /// No structural marker recognized.
    #[default]
    Unknown,
}

impl Category {
    /// Prefix used when deriving storage keys.
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            Category::Petition => "peticao",
            Category::OfficialDocument => "doc_oficial",
            Category::Unknown => "desconhecido",
        }
    }

    /// Legacy label reported when no specific type rule matches.
    pub fn generic_label(&self) -> &'static str {
        match self {
            Category::Petition | Category::Unknown => "GENERICO",
            Category::OfficialDocument => "DOC_OFICIAL_GENERICO",
        }
    }

    /// Prefix of canonical type ids within this category.
    pub fn type_prefix(&self) -> &'static str {
        match self {
            Category::Petition => "pet",
            Category::OfficialDocument => "doc_oficial",
            Category::Unknown => "desconhecido",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Petition => "petition",
            Category::OfficialDocument => "official_document",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legal subject-matter domain; selects rule sets and extractor family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Marcas.
    #[default]
    Trademarks,
    /// Patentes.
    Patents,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Trademarks => "trademarks",
            Sector::Patents => "patents",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trademarks" | "trademark" | "marcas" | "marca" => Ok(Sector::Trademarks),
            "patents" | "patent" | "patentes" | "patente" => Ok(Sector::Patents),
            other => Err(format!("unknown sector: {}", other)),
        }
    }
}

/// Outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected category.
    pub category: Category,

    /// Canonical type id within the category; empty unless a specific
    /// type rule matched.
    #[serde(default)]
    pub type_id: String,

    /// Reserved for finer-grained distinctions; always empty for now.
    #[serde(default)]
    pub subtype_id: String,

    /// Category confidence (0.0 - 1.0); zero exactly when the category is unknown.
    pub confidence: f32,

    /// Confidence of the type stage (0.0 - 1.0).
    #[serde(default)]
    pub type_confidence: f32,

    /// Legacy free-text type label (e.g. `RECURSO_INDEFERIMENTO`).
    #[serde(default)]
    pub original_type: String,

    /// Sector whose rules produced this result.
    pub sector: Sector,
}

impl ClassificationResult {
    /// Result for a document no rule recognized.
    pub fn unknown(sector: Sector) -> Self {
        Self {
            category: Category::Unknown,
            type_id: String::new(),
            subtype_id: String::new(),
            confidence: 0.0,
            type_confidence: 0.0,
            original_type: String::new(),
            sector,
        }
    }

    /// Whether a specific (non-generic) type was determined.
    pub fn has_specific_type(&self) -> bool {
        !self.type_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_parsing() {
        assert_eq!("marcas".parse::<Sector>(), Ok(Sector::Trademarks));
        assert_eq!("Patents".parse::<Sector>(), Ok(Sector::Patents));
        assert!("desenhos".parse::<Sector>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::OfficialDocument).unwrap();
        assert_eq!(json, "\"official_document\"");
        assert_eq!(Category::OfficialDocument.storage_prefix(), "doc_oficial");
    }

    #[test]
    fn test_unknown_result_has_zero_confidence() {
        let result = ClassificationResult::unknown(Sector::Patents);
        assert_eq!(result.category, Category::Unknown);
        assert_eq!(result.confidence, 0.0);
        assert!(!result.has_specific_type());
    }
}
