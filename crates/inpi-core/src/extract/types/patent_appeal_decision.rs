//! Patent appeal denied: the president's decision keeping the refusal of a
//! patent application ("Recurso conhecido e negado provimento").

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::extract::rules::{
    capture, capture_collapsed, parse_long_date, wrap_opinion, ArticleExtractor, FieldExtractor,
    ProcessNumberExtractor, ProcessScheme,
};
use crate::extract::{storage_key, DocumentExtractor, ExtractionInput};
use crate::models::{Category, ExtractionConfig, ExtractionRecord};

const TYPE_ID: &str = "recursoIndeferimentoNaoProvidoPatente";
const KEY_SLUG: &str = "recurso_nao_provido_patente";

pub const DISPATCH_TYPE: &str = "Recurso não provido";
pub const DECISION: &str = "indeferido_mantido";

lazy_static! {
    static ref PCT_NUMBER: Regex = Regex::new(
        r"(?i)N\.\s*[°º]\s+de\s+Dep[óo]sito\s+PCT\s*:\s*([^\n]*?)\s*(?:\n|Data\s+de\s+Dep[óo]sito|\z)"
    ).unwrap();

    static ref FILING_DATE: Regex = Regex::new(
        r"(?i)Data\s+de\s+Dep[óo]sito\s*:\s*([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref UNIONIST_PRIORITY: Regex = Regex::new(
        r"(?i)Prioridade\s+Unionista[ \t]*:[ \t]*([^\n]+)"
    ).unwrap();

    // Runs until the inventor line or the next "Label:" line
    static ref APPLICANT: Regex = Regex::new(
        r"(?is)Depositante\s*:\s*(.+?)\n\s*(?:Inventor\s*:|(?-i:\p{Lu}\p{Ll}+)\s*:)"
    ).unwrap();

    static ref STATE_SUFFIX: Regex = Regex::new(r"\s*\([A-Z]+\)\s*$").unwrap();

    static ref INVENTOR: Regex = Regex::new(
        r"(?is)Inventor\s*:\s*(.+?)\n\s*T[íi]tulo\s*:"
    ).unwrap();

    static ref QUOTED_TITLE: Regex = Regex::new(
        r#"(?is)T[íi]tulo\s*:\s*[“"](.+?)[”"]"#
    ).unwrap();

    static ref UNQUOTED_TITLE: Regex = Regex::new(
        r#"(?i)T[íi]tulo\s*:\s*([^“"]+?)\n(?-i:[A-ZÁ-Ú]{3})"#
    ).unwrap();

    static ref AUTOMATIC_TEXT_1: Regex = Regex::new(
        r"(?is)^(.+?)SUBS[ÍI]DIOS\s+T[ÉE]CNICOS"
    ).unwrap();

    static ref CODE_LINES: Regex = Regex::new(r"\nCódigo:[^\n]+\n[^\n]+").unwrap();

    static ref AUTOMATIC_TEXT_2: Regex = Regex::new(
        r#"(?is)SERVIÇO\s+PÚBLICO\s+FEDERAL.+?T[íi]tulo\s*:\s*[“"].+?[”"]"#
    ).unwrap();

    static ref RPI_DATE: Regex = Regex::new(
        r"RPI\s+[0-9]+\s+de\s+([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref DECISION_TEXT: Regex = Regex::new(
        r"(?i)Recurso\s+conhecido\s+e\s+negado\s+provimento\.?\s*Mantido\s+o\s+indeferimento\s+do\s+pedido\s*\[código\s+[0-9]+\]"
    ).unwrap();

    static ref OPINION: Regex = Regex::new(
        r"(?is)Sr\.\s+Presidente,(.+?)(?:Recurso\s+conhecido|Código:|\z)"
    ).unwrap();

    static ref TECHNICAL_COORDINATOR: Regex = Regex::new(
        r"(?i)Coordenador\s+(?:T[ée]cnico|Substituta)/Mat\.\s+[^\n]+\n(.+?)Portaria"
    ).unwrap();

    static ref DENIAL_REASON: Regex = Regex::new(
        r"(?is)foi\s+indeferido\s+com\s+base\s+nos\s+(.+?)(?:\.\s*Tal\s+decis[ãa]o|\z)"
    ).unwrap();
}

/// Empty, dash-only placeholders ("-", "- -") mean "not informed".
fn informed(value: String) -> Option<String> {
    if value.chars().all(|c| c == '-' || c.is_whitespace()) {
        None
    } else {
        Some(value)
    }
}

fn pct_number(text: &str) -> Option<String> {
    capture(&PCT_NUMBER, text)
        .and_then(informed)
        .filter(|v| !v.to_lowercase().starts_with("data de"))
}

fn applicant(text: &str) -> Option<String> {
    let raw = capture(&APPLICANT, text)?;
    crate::text::non_empty(&STATE_SUFFIX.replace(&raw, ""))
}

fn title(text: &str) -> Option<String> {
    capture_collapsed(&QUOTED_TITLE, text).or_else(|| capture_collapsed(&UNQUOTED_TITLE, text))
}

/// Institutional header up to the technical-subsidies section, without
/// the "Código:" barcode lines.
fn automatic_text_1(text: &str) -> Option<String> {
    let head = capture(&AUTOMATIC_TEXT_1, text)?;
    crate::text::non_empty(&CODE_LINES.replace_all(&head, ""))
}

/// The last institutional header block, which repeats the application data.
fn automatic_text_2(text: &str) -> Option<String> {
    AUTOMATIC_TEXT_2
        .find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
}

pub struct PatentAppealDecisionExtractor {
    articles: ArticleExtractor,
}

impl PatentAppealDecisionExtractor {
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

impl Default for PatentAppealDecisionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for PatentAppealDecisionExtractor {
    fn name(&self) -> &'static str {
        "PatentAppealDecisionExtractor"
    }

    fn schema_name(&self, _category: Category) -> &'static str {
        TYPE_ID
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord {
        let text = input.text;
        let mut record = input.start_record(Category::OfficialDocument, TYPE_ID, self.name());

        let process = ProcessNumberExtractor::new(ProcessScheme::PatentDecision)
            .extract(text)
            .map(|m| m.value);
        debug!(?process, "patent decision application number");

        let decision_text = DECISION_TEXT.find(text).map(|m| m.as_str().trim().to_string());

        record.set("process_number", process);
        record.set("pct_number", pct_number(text));
        record.set("filing_date", capture(&FILING_DATE, text));
        record.set(
            "unionist_priority",
            capture(&UNIONIST_PRIORITY, text).and_then(informed),
        );
        record.set("applicant_name", applicant(text));
        record.set("inventor_name", capture_collapsed(&INVENTOR, text));
        record.set("title", title(text));

        record.set("automatic_text_1", automatic_text_1(text));
        record.set("automatic_text_2", automatic_text_2(text));

        record.set("dispatch_date", parse_long_date(text));
        record.set("denial_notification_date", capture(&RPI_DATE, text));
        record.set("decision_name", decision_text.clone());
        record.set("decision_text", decision_text);
        record.set(
            "opinion_text",
            capture(&OPINION, text).map(|body| wrap_opinion(&body)),
        );
        record.set("examiner", capture(&TECHNICAL_COORDINATOR, text));

        record.set("dispatch_type", DISPATCH_TYPE);
        record.set("decision", DECISION);
        record.set("denial_reason", capture(&DENIAL_REASON, text));
        record.set("cited_articles", self.articles.extract_all(text));
        record.set("prior_marks", Vec::<String>::new());
        record.set("conflicting_processes", Vec::<String>::new());
        record.set("full_text", text);

        record
    }

    fn storage_key(&self, record: &ExtractionRecord) -> String {
        storage_key(
            Category::OfficialDocument,
            record.text("process_number"),
            KEY_SLUG,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationResult, Sector, OPINION_START_MARKER};
    use pretty_assertions::assert_eq;

    const DECISION_DOC: &str = "SERVIÇO PÚBLICO FEDERAL\n\
        MINISTÉRIO DO DESENVOLVIMENTO, INDÚSTRIA, COMÉRCIO E SERVIÇOS\n\
        INSTITUTO NACIONAL DA PROPRIEDADE INDUSTRIAL\n\
        N.° do Pedido: BR 10 2014 004206 7\n\
        N.° de Depósito PCT: -\n\
        Data de Depósito: 24/02/2014\n\
        Prioridade Unionista: -\n\
        Depositante: EMPRESA DE TECNOLOGIA LTDA (BRSP)\n\
        Inventor: JOÃO PEREIRA; MARIA\nSILVA\n\
        Título: “Dispositivo de\nmedição”\n\
        SUBSÍDIOS TÉCNICOS\n\
        Sr. Presidente,\n\
        O pedido foi indeferido com base nos artigos 8º c/c 13 da LPI. \
        Tal decisão foi publicada na RPI 2700 de 15/10/2022.\n\
        Após exame do recurso, mantém-se a decisão.\n\
        Recurso conhecido e negado provimento. Mantido o indeferimento do pedido [código 111]\n\
        Rio de Janeiro, 5 de março de 2025.\n\
        Coordenador Técnico/Mat. 1234567\n\
        FULANO DE TAL Portaria INPI/PR nº 10/2020";

    fn extract(text: &str) -> ExtractionRecord {
        let result = ClassificationResult {
            category: Category::OfficialDocument,
            type_id: TYPE_ID.to_string(),
            subtype_id: String::new(),
            confidence: 0.85,
            type_confidence: 1.0,
            original_type: "RECURSO_NAO_PROVIDO".to_string(),
            sector: Sector::Patents,
        };
        PatentAppealDecisionExtractor::new().extract(&ExtractionInput::new(text, &result))
    }

    #[test]
    fn test_application_header() {
        let record = extract(DECISION_DOC);

        assert_eq!(record.text("process_number"), Some("BR1020140042067"));
        assert_eq!(record.text("pct_number"), None);
        assert_eq!(record.text("filing_date"), Some("24/02/2014"));
        assert_eq!(record.text("unionist_priority"), None);
        assert_eq!(record.text("applicant_name"), Some("EMPRESA DE TECNOLOGIA LTDA"));
        assert_eq!(record.text("inventor_name"), Some("JOÃO PEREIRA; MARIA SILVA"));
        assert_eq!(record.text("title"), Some("Dispositivo de medição"));
    }

    #[test]
    fn test_decision_fields() {
        let record = extract(DECISION_DOC);

        assert_eq!(record.text("dispatch_date"), Some("05/03/2025"));
        assert_eq!(record.text("denial_notification_date"), Some("15/10/2022"));
        assert_eq!(
            record.text("decision_text"),
            Some("Recurso conhecido e negado provimento. Mantido o indeferimento do pedido [código 111]")
        );
        assert_eq!(record.text("examiner"), Some("FULANO DE TAL"));
        assert_eq!(record.text("denial_reason"), Some("artigos 8º c/c 13 da LPI"));
        assert_eq!(
            record.value("cited_articles").as_list(),
            Some(&["Art. 8".to_string(), "Art. 13".to_string()][..])
        );
        assert!(record.value("prior_marks").is_empty());
        assert_eq!(record.text("decision"), Some(DECISION));
    }

    #[test]
    fn test_opinion_and_automatic_texts() {
        let record = extract(DECISION_DOC);

        let opinion = record.text("opinion_text").unwrap();
        assert!(opinion.starts_with(OPINION_START_MARKER));
        assert!(opinion.contains("mantém-se a decisão."));
        assert!(!opinion.contains("negado provimento"));

        let first = record.text("automatic_text_1").unwrap();
        assert!(first.starts_with("SERVIÇO PÚBLICO FEDERAL"));
        assert!(first.ends_with("medição”"));
        assert_eq!(record.text("automatic_text_2"), Some(first));
    }

    #[test]
    fn test_pct_and_priority_when_informed() {
        let text = "N.° de Depósito PCT: PCT/BR2020/050123 Data de Depósito: 24/02/2020\n\
                    Prioridade Unionista: US 62/123,456 de 01/03/2019\n";
        assert_eq!(pct_number(text), Some("PCT/BR2020/050123".to_string()));
        assert_eq!(
            capture(&UNIONIST_PRIORITY, text).and_then(informed),
            Some("US 62/123,456 de 01/03/2019".to_string())
        );
        assert_eq!(pct_number("N.° de Depósito PCT:\nData de Depósito: 24/02/2020"), None);
    }

    #[test]
    fn test_code_lines_removed_from_first_block() {
        let text = "Cabeçalho\nCódigo: 123 abc\nBR1020140042067\nResto\nSUBSÍDIOS TÉCNICOS";
        assert_eq!(automatic_text_1(text), Some("Cabeçalho\nResto".to_string()));
    }

    #[test]
    fn test_unquoted_title_falls_back_to_next_heading() {
        assert_eq!(
            title("Título: Sistema de\nfreio regenerativo\nSUBSÍDIOS TÉCNICOS"),
            Some("Sistema de freio regenerativo".to_string())
        );
    }

    #[test]
    fn test_storage_key() {
        let record = extract(DECISION_DOC);
        assert_eq!(
            PatentAppealDecisionExtractor::new().storage_key(&record),
            "doc_oficial_br1020140042067_recurso_nao_provido_patente"
        );
    }
}
