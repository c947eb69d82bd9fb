//! Document sections: header window, petition narrative, opinion wrapping.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::DECLARATION;
use crate::models::{OPINION_END_MARKER, OPINION_START_MARKER};
use crate::text::char_window;

lazy_static! {
    static ref NARRATIVE: Regex = Regex::new(
        r"(?is)Classes\s+objeto\s+do\s+recurso\s+NCL[0-9()\s]+(.*?)Texto\s+da\s+Peti[çc][ãa]o"
    ).unwrap();

    static ref LEADING_PAGE_MARK: Regex = Regex::new(
        r"(?i)^P[áa]gina\s+[0-9]+\s+de\s+[0-9]+\s*"
    ).unwrap();

    static ref LEADING_ADDRESSEE: Regex = Regex::new(r"(?i)^[ÀA]\s+").unwrap();
}

/// First-page header of a petition form.
///
/// Everything before "Declaro, sob as penas da lei,"; without that marker,
/// the first `max_chars` characters.
pub fn header_window(text: &str, max_chars: usize) -> &str {
    match DECLARATION.find(text) {
        Some(m) => &text[..m.start()],
        None => char_window(text, max_chars),
    }
}

/// Free-text argument typed into the petition form.
///
/// Sits between "Classes objeto do recurso NCL(..)" and "Texto da Petição";
/// a leading page marker and addressee ("À ...") are dropped.
pub fn petition_narrative(text: &str) -> Option<String> {
    let caps = NARRATIVE.captures(text)?;
    let narrative = caps[1].trim();
    let narrative = LEADING_PAGE_MARK.replace(narrative, "");
    let narrative = LEADING_ADDRESSEE.replace(&narrative, "");
    crate::text::non_empty(&narrative)
}

/// Wrap an opinion body in its sentinel markers.
pub fn wrap_opinion(body: &str) -> String {
    format!("{}\n{}\n{}", OPINION_START_MARKER, body.trim(), OPINION_END_MARKER)
}
