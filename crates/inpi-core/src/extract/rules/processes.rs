//! Related-process and prior-mark lists.

use lazy_static::lazy_static;
use regex::Regex;

use super::ordered_dedup;
use super::patterns::{PROCESS_HEADING, STANDALONE_9};

lazy_static! {
    static ref PRIOR_MARKS_SECTION: Regex = Regex::new(
        r"(?is)MARCA\(S\)\s+APONTADA\(S\)\s+COMO\s+IMPEDITIVA\(S\)\s*:(.+?)(?:Ap[óo]s\s+ter\s+sido\s+examinado|\z)"
    ).unwrap();
}

/// Deduplicate occurrences and drop the primary (first) one.
pub fn exclude_primary<I>(occurrences: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    ordered_dedup(occurrences).into_iter().skip(1).collect()
}

/// Processes cited as "Processo NNNNNNNNN", excluding the document's own
/// (first) process.
pub fn extract_related_processes(text: &str) -> Vec<String> {
    exclude_primary(
        PROCESS_HEADING
            .captures_iter(text)
            .map(|caps| caps[1].to_string()),
    )
}

/// 9-digit registrations listed in the "marcas apontadas como impeditivas"
/// section.
pub fn extract_prior_marks(text: &str) -> Vec<String> {
    let Some(caps) = PRIOR_MARKS_SECTION.captures(text) else {
        return Vec::new();
    };

    ordered_dedup(
        STANDALONE_9
            .captures_iter(&caps[1])
            .map(|m| m[1].to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exclude_primary() {
        let occurrences = ["A", "B", "B", "C"].map(String::from);
        assert_eq!(exclude_primary(occurrences), vec!["B", "C"]);
        assert!(exclude_primary(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_related_processes() {
        let text = "Processo 912345678 ... conflito com Processo 900000001 e Processo 900000002; \
                    ver Processo 900000001";
        assert_eq!(extract_related_processes(text), vec!["900000001", "900000002"]);
    }

    #[test]
    fn test_prior_marks_section() {
        let text = "Processo 912345678\nMARCA(S) APONTADA(S) COMO IMPEDITIVA(S):\n\
                    840000001 - MARCA A\n840000002 - MARCA B\n840000001\n\
                    Após ter sido examinado o recurso 999999999";
        assert_eq!(extract_prior_marks(text), vec!["840000001", "840000002"]);
        assert!(extract_prior_marks("sem seção").is_empty());
    }
}
