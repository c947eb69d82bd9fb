//! Fallback extractor for types without a dedicated extractor.

use tracing::debug;

use super::rules::{
    dates::format_date, extract_related_processes, ArticleExtractor, DateExtractor,
    FieldExtractor, FilingForm, PetitionNumberExtractor, ProcessNumberExtractor, ProcessScheme,
};
use super::{storage_key, DocumentExtractor, ExtractionInput};
use crate::models::{Category, ExtractionConfig, ExtractionRecord, Sector};
use crate::text::slugify;

/// Extractor reading the identifiers every INPI document carries.
pub struct GenericExtractor {
    articles: ArticleExtractor,
}

impl GenericExtractor {
    pub fn new() -> Self {
        Self {
            articles: ArticleExtractor::new(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            articles: ArticleExtractor::new().with_excluded(config.excluded_articles.clone()),
        }
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "GenericExtractor"
    }

    fn schema_name(&self, category: Category) -> &'static str {
        match category {
            Category::Petition => "generico_peticao",
            Category::OfficialDocument => "generico_doc_oficial",
            Category::Unknown => "generico",
        }
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord {
        let text = input.text;
        let category = input.classification.category;
        let form = match input.classification.sector {
            Sector::Trademarks => FilingForm::Trademark,
            Sector::Patents => FilingForm::Patent,
        };

        let default_type = format!("{}_generico", category.type_prefix());
        let mut record = input.start_record(category, &default_type, self.name());

        let process = ProcessNumberExtractor::new(ProcessScheme::Generic)
            .extract(text)
            .map(|m| m.value);
        let petition = PetitionNumberExtractor::new(form).extract(text).map(|m| m.value);
        let date = DateExtractor::new().extract(text).map(|m| format_date(m.value));

        debug!(?process, ?petition, "generic identifiers");

        record.set("process_number", process);
        record.set("petition_number", petition);
        record.set("date", date);
        record.set("full_text", text);
        record.set("cited_articles", self.articles.extract_all(text));
        record.set("related_processes", extract_related_processes(text));
        record.set("original_type", input.classification.original_type.as_str());

        record
    }

    fn storage_key(&self, record: &ExtractionRecord) -> String {
        let slug = match record.text("original_type").map(slugify) {
            Some(slug) if !slug.is_empty() => slug,
            _ => "generico".to_string(),
        };

        let petition = match record.category {
            Category::Petition => record.text("petition_number"),
            _ => None,
        };

        storage_key(record.category, record.text("process_number"), &slug, petition)
    }
}
