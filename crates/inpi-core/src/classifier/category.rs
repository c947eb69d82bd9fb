//! Category detection over the first characters of a document.
//!
//! Petitions carry a 17-digit protocol number near the top ("nosso
//! número"); official documents open with institutional headers. One
//! classifier serves every sector; only its [`CategoryRules`] differ.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{Category, Sector};
use crate::text::char_window;

/// Number of leading characters inspected.
pub const CATEGORY_WINDOW_CHARS: usize = 250;

/// Confidence reported when a category marker matched.
pub const CATEGORY_CONFIDENCE: f32 = 0.85;

const TRADEMARK_MARKERS: &[&str] = &["Processo de registro de marca", "Petição de Marca"];

const PATENT_MARKERS: &[&str] = &["Instituto Nacional da Propriedade Industrial"];

const INSTITUTIONAL_HEADER: &str = "SERVIÇO PÚBLICO FEDERAL MINISTÉRIO DO DESENVOLVIMENTO, \
     INDÚSTRIA, COMÉRCIO E SERVIÇOS INSTITUTO NACIONAL DA PROPRIEDADE INDUSTRIAL";

lazy_static! {
    // Unicode-aware so a non-ASCII digit still extends the run
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();

    static ref PETITION_TIMESTAMP: Regex =
        Regex::new(r"^\s*[0-9]{2}/[0-9]{2}/[0-9]{4}\s+[0-9]{2}:[0-9]{2}").unwrap();
}

/// Marker configuration for one category classifier.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    sector: Sector,
    /// `None` when the marker list is empty.
    official_markers: Option<Regex>,
    strict_petition: bool,
}

impl CategoryRules {
    /// Rules for a specific sector.
    pub fn for_sector(sector: Sector) -> Self {
        let markers = match sector {
            Sector::Trademarks => TRADEMARK_MARKERS.to_vec(),
            Sector::Patents => PATENT_MARKERS.to_vec(),
        };
        Self::with_markers(sector, &markers)
    }

    /// Sector-agnostic rules: the trademark markers plus the full
    /// institutional header.
    pub fn generic(sector: Sector) -> Self {
        let mut markers = TRADEMARK_MARKERS.to_vec();
        markers.push(INSTITUTIONAL_HEADER);
        Self::with_markers(sector, &markers)
    }

    /// Rules with an arbitrary marker list (matched case-insensitively).
    pub fn with_markers(sector: Sector, markers: &[&str]) -> Self {
        Self {
            sector,
            official_markers: marker_regex(markers),
            strict_petition: false,
        }
    }

    /// Require a `DD/MM/YYYY HH:MM` token right after the petition number.
    pub fn with_strict_petition(mut self, strict: bool) -> Self {
        self.strict_petition = strict;
        self
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn strict_petition(&self) -> bool {
        self.strict_petition
    }
}

fn marker_regex(markers: &[&str]) -> Option<Regex> {
    let alternatives: Vec<String> = markers
        .iter()
        .filter(|m| !m.trim().is_empty())
        .map(|m| {
            m.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    // Escaped literals joined by alternation always compile.
    Some(Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).unwrap())
}

/// Parametrized category classifier.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: CategoryRules,
}

impl CategoryClassifier {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    /// Detect the category of `text`; returns the category and its confidence.
    ///
    /// Callers are expected to reject empty text beforehand.
    pub fn classify(&self, text: &str) -> (Category, f32) {
        let window = char_window(text, CATEGORY_WINDOW_CHARS);

        if has_petition_number(window, self.rules.strict_petition) {
            debug!("17-digit petition number found in header");
            return (Category::Petition, CATEGORY_CONFIDENCE);
        }

        if self
            .rules
            .official_markers
            .as_ref()
            .is_some_and(|markers| markers.is_match(window))
        {
            debug!("official document marker found in header");
            return (Category::OfficialDocument, CATEGORY_CONFIDENCE);
        }

        debug!("no category marker in first {} chars", CATEGORY_WINDOW_CHARS);
        (Category::Unknown, 0.0)
    }
}

/// Whether `window` holds a run of exactly 17 ASCII digits (optionally
/// followed by a date-time token).
pub fn has_petition_number(window: &str, strict: bool) -> bool {
    DIGIT_RUN.find_iter(window).any(|m| {
        let run = m.as_str();
        run.len() == 17
            && run.bytes().all(|b| b.is_ascii_digit())
            && (!strict || PETITION_TIMESTAMP.is_match(&window[m.end()..]))
    })
}
