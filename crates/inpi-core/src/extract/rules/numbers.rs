//! Petition, process and our-number extraction.

use regex::Regex;

use super::patterns::{
    BR_APPLICATION, BR_APPLICATION_DECISION, BR_APPLICATION_LABELED, OUR_NUMBER,
    PETITION_BEFORE_LABEL, PETITION_LABELED, PETITION_PATENT_FORM, PETITION_TRADEMARK_FORM,
    PROCESS_AFTER_TIMESTAMP, PROCESS_BEFORE_LABEL, PROCESS_HEADING, PROCESS_LABELED, STANDALONE_12,
    STANDALONE_9,
};
use super::{ExtractionMatch, FieldExtractor, FilingForm};

/// Run an ordered rule chain, collecting every match of every rule.
///
/// Values are whitespace-stripped and deduplicated; the first element is
/// the first match of the highest-priority rule that matched.
fn run_chain(rules: &[(&Regex, f32)], text: &str) -> Vec<ExtractionMatch<String>> {
    let mut results: Vec<ExtractionMatch<String>> = Vec::new();

    for (re, confidence) in rules {
        for caps in re.captures_iter(text) {
            let (Some(full), Some(group)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value: String = group
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .trim_end_matches('-')
                .to_string();

            if value.is_empty() || results.iter().any(|r| r.value == value) {
                continue;
            }

            results.push(
                ExtractionMatch::new(value, *confidence, full.as_str())
                    .with_position(full.start(), full.end()),
            );
        }
    }

    results
}

/// 12-digit petition number extractor.
pub struct PetitionNumberExtractor {
    form: FilingForm,
}

impl PetitionNumberExtractor {
    pub fn new(form: FilingForm) -> Self {
        Self { form }
    }
}

impl FieldExtractor for PetitionNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let form_header: &Regex = match self.form {
            FilingForm::Trademark => &*PETITION_TRADEMARK_FORM,
            FilingForm::Patent => &*PETITION_PATENT_FORM,
        };

        run_chain(
            &[
                (form_header, 0.95),
                (&*PETITION_LABELED, 0.9),
                (&*PETITION_BEFORE_LABEL, 0.8),
                (&*STANDALONE_12, 0.5),
            ],
            text,
        )
    }
}

/// Which document layout a process number is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessScheme {
    /// Trademark petition form (9 digits).
    TrademarkForm,
    /// Patent petition form (BR application number, legacy 9 digits).
    PatentForm,
    /// Trademark decision ("Processo NNNNNNNNN").
    TrademarkDecision,
    /// Patent decision ("N.° do Pedido: BR...").
    PatentDecision,
    /// Any document.
    Generic,
}

/// Process / application number extractor.
pub struct ProcessNumberExtractor {
    scheme: ProcessScheme,
}

impl ProcessNumberExtractor {
    pub fn new(scheme: ProcessScheme) -> Self {
        Self { scheme }
    }
}

impl FieldExtractor for ProcessNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        match self.scheme {
            ProcessScheme::TrademarkForm => run_chain(
                &[
                    (&*PROCESS_LABELED, 0.95),
                    (&*PROCESS_AFTER_TIMESTAMP, 0.9),
                    (&*PROCESS_BEFORE_LABEL, 0.8),
                    (&*STANDALONE_9, 0.5),
                ],
                text,
            ),
            ProcessScheme::PatentForm => run_chain(
                &[
                    (&*BR_APPLICATION, 0.95),
                    (&*BR_APPLICATION_LABELED, 0.9),
                    (&*PROCESS_LABELED, 0.8),
                    (&*STANDALONE_9, 0.5),
                ],
                text,
            ),
            ProcessScheme::TrademarkDecision => {
                run_chain(&[(&*PROCESS_HEADING, 0.9), (&*STANDALONE_9, 0.5)], text)
            }
            ProcessScheme::PatentDecision => run_chain(&[(&*BR_APPLICATION_DECISION, 0.95)], text),
            ProcessScheme::Generic => run_chain(
                &[
                    (&*PROCESS_LABELED, 0.95),
                    (&*BR_APPLICATION_LABELED, 0.9),
                    (&*PROCESS_HEADING, 0.85),
                    (&*BR_APPLICATION, 0.8),
                    (&*STANDALONE_9, 0.5),
                ],
                text,
            ),
        }
    }
}

/// Extract the 17-digit our-number ("nosso número"), dots removed.
pub fn extract_our_number(text: &str) -> Option<String> {
    OUR_NUMBER
        .captures(text)
        .map(|caps| caps[1].replace('.', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRADEMARK_HEADER: &str = "Petição de Marca 850240123456\n\
        31123252330338563 16/12/2024 12:29 912345678 Número do Processo\n\
        Número da Petição: 850240123456";

    fn value(m: Option<ExtractionMatch<String>>) -> Option<String> {
        m.map(|m| m.value)
    }

    #[test]
    fn test_petition_number_from_form_header() {
        let extractor = PetitionNumberExtractor::new(FilingForm::Trademark);
        let found = extractor.extract(TRADEMARK_HEADER).unwrap();
        assert_eq!(found.value, "850240123456");
        assert_eq!(found.confidence, 0.95);
    }

    #[test]
    fn test_petition_number_before_label() {
        let extractor = PetitionNumberExtractor::new(FilingForm::Trademark);
        let text = "ref 111 850240999999 Número da Petição";
        assert_eq!(value(extractor.extract(text)), Some("850240999999".to_string()));
    }

    #[test]
    fn test_petition_number_positional_fallback() {
        let extractor = PetitionNumberExtractor::new(FilingForm::Patent);
        let found = extractor.extract("protocolo 870230012345 recebido").unwrap();
        assert_eq!(found.value, "870230012345");
        assert_eq!(found.confidence, 0.5);
    }

    #[test]
    fn test_process_number_after_timestamp() {
        let extractor = ProcessNumberExtractor::new(ProcessScheme::TrademarkForm);
        assert_eq!(value(extractor.extract(TRADEMARK_HEADER)), Some("912345678".to_string()));
    }

    #[test]
    fn test_labeled_process_beats_positional() {
        let extractor = ProcessNumberExtractor::new(ProcessScheme::TrademarkForm);
        let text = "123456789 outro número\nNúmero do Processo: 987654321";
        let all = extractor.extract_all(text);
        assert_eq!(all[0].value, "987654321");
        assert_eq!(all[1].value, "123456789");
    }

    #[test]
    fn test_patent_process_number() {
        let extractor = ProcessNumberExtractor::new(ProcessScheme::PatentForm);
        let text = "Número do Pedido: BR 10 2014 004206 7\noutros 123456789";
        assert_eq!(value(extractor.extract(text)), Some("BR1020140042067".to_string()));

        let decision = ProcessNumberExtractor::new(ProcessScheme::PatentDecision);
        let text = "N.° do Pedido: BR 10 2014 004206 7";
        assert_eq!(value(decision.extract(text)), Some("BR1020140042067".to_string()));
        assert_eq!(value(decision.extract("sem pedido")), None);
    }

    #[test]
    fn test_our_number() {
        assert_eq!(
            extract_our_number("Nosso número: 31123252330338563"),
            Some("31123252330338563".to_string())
        );
        assert_eq!(extract_our_number("curto 1234567890"), None);
    }
}
