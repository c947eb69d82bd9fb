//! Rule-based field extractors for INPI filings.
//!
//! Every rule is an ordered chain: labeled patterns first, positional
//! fallbacks last. Absence is `None`, never an error.

pub mod articles;
pub mod attachments;
pub mod dates;
pub mod numbers;
pub mod parties;
pub mod patterns;
pub mod processes;
pub mod sections;

pub use articles::{extract_articles, format_article, ArticleExtractor};
pub use attachments::{extract_attachments, AttachmentLayout, KNOWN_EXTENSIONS};
pub use dates::{extract_petition_timestamp, parse_long_date, DateExtractor};
pub use numbers::{
    extract_our_number, PetitionNumberExtractor, ProcessNumberExtractor, ProcessScheme,
};
pub use parties::{Applicant, Attorney};
pub use processes::{extract_prior_marks, extract_related_processes, exclude_primary};
pub use sections::{header_window, petition_narrative, wrap_opinion};

use std::collections::HashSet;

use regex::Regex;

/// Which filing form a petition was submitted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingForm {
    /// e-Marcas form ("Petição de Marca").
    Trademark,
    /// e-Patentes form ("Petição de Patente").
    Patent,
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, best candidate first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// First capture group of `re` in `text`, trimmed; `None` when absent or blank.
pub fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| crate::text::non_empty(m.as_str()))
}

/// Like [`capture`], with internal whitespace collapsed.
pub fn capture_collapsed(re: &Regex, text: &str) -> Option<String> {
    capture(re, text).map(|s| crate::text::collapse_whitespace(&s))
}

/// Deduplicate while keeping first-seen order.
pub fn ordered_dedup<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            ordered.push(item);
        }
    }
    ordered
}
