//! Cited legal article extraction (Lei da Propriedade Industrial).

use super::patterns::ARTICLE;
use super::{ordered_dedup, FieldExtractor};

/// Cited-article extractor.
///
/// Output is normalized to `Art. N` / `Art. N, inc. X`, deduplicated in
/// order of first appearance, with excluded article numbers dropped.
pub struct ArticleExtractor {
    excluded: Vec<String>,
}

impl ArticleExtractor {
    /// Extractor excluding the procedural articles 212 and 169.
    pub fn new() -> Self {
        Self {
            excluded: vec!["212".to_string(), "169".to_string()],
        }
    }

    /// Replace the excluded article numbers.
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    fn is_excluded(&self, number: &str) -> bool {
        self.excluded.iter().any(|e| e == number)
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ArticleExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut found = Vec::new();

        for caps in ARTICLE.captures_iter(text) {
            let number = &caps[1];
            if !self.is_excluded(number) {
                let clause = caps.get(2).map(|m| m.as_str());
                found.push(format_article(number, clause));
            }

            // "art. 8º c/c 13": the combined article counts on its own
            if let Some(combined) = caps.get(3) {
                if !self.is_excluded(combined.as_str()) {
                    found.push(format_article(combined.as_str(), None));
                }
            }
        }

        ordered_dedup(found)
    }
}

/// Canonical article label.
pub fn format_article(number: &str, clause: Option<&str>) -> String {
    let number = number.trim_start_matches('0');
    let number = if number.is_empty() { "0" } else { number };
    match clause {
        Some(clause) => format!("Art. {}, inc. {}", number, clause.to_uppercase()),
        None => format!("Art. {}", number),
    }
}

/// Extract cited articles with the default exclusions.
pub fn extract_articles(text: &str) -> Vec<String> {
    ArticleExtractor::new().extract_all(text)
}
