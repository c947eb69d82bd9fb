//! Date extraction for Brazilian filings (DD/MM/YYYY, long-form Portuguese dates).

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, LONG_DATE_RIO, TIMESTAMP, TIMESTAMP_SPLIT};
use super::{ExtractionMatch, FieldExtractor};

/// Extractor for `DD/MM/YYYY` dates that are valid calendar dates.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(1)?;
                let date = NaiveDate::parse_from_str(m.as_str(), "%d/%m/%Y").ok()?;
                Some(ExtractionMatch::new(date, 0.8, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect()
    }
}

/// Format a date the way the office prints it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Petition date-time as `DD/MM/YYYY HH:MM`.
///
/// Accepts both `date time` and `time date` orders. With `allow_split`,
/// also pairs a date with a time up to 50 chars later, and finally falls
/// back to the bare date.
pub fn extract_petition_timestamp(text: &str, allow_split: bool) -> Option<String> {
    if let Some(caps) = TIMESTAMP.captures(text) {
        if let (Some(date), Some(time)) = (caps.get(1), caps.get(2)) {
            return Some(format!("{} {}", date.as_str(), time.as_str()));
        }
        if let (Some(time), Some(date)) = (caps.get(3), caps.get(4)) {
            return Some(format!("{} {}", date.as_str(), time.as_str()));
        }
    }

    if !allow_split {
        return None;
    }

    if let Some(caps) = TIMESTAMP_SPLIT.captures(text) {
        return Some(format!("{} {}", &caps[1], &caps[2]));
    }

    DATE_DMY.captures(text).map(|caps| caps[1].to_string())
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Convert "Rio de Janeiro, 5 de março de 2025" into `05/03/2025`.
///
/// Returns `None` for unknown month names or impossible dates.
pub fn parse_long_date(text: &str) -> Option<String> {
    let caps = LONG_DATE_RIO.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(format_date)
}
