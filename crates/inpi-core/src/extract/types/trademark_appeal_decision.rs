//! Trademark appeal denied ("Recurso não provido. Decisão mantida"):
//! the office's final decision keeping a trademark refusal.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::extract::rules::patterns::DATE_DMY;
use crate::extract::rules::{
    capture, extract_prior_marks, extract_related_processes, wrap_opinion, ArticleExtractor,
    FieldExtractor, ProcessNumberExtractor, ProcessScheme,
};
use crate::extract::{storage_key, DocumentExtractor, ExtractionInput};
use crate::models::{Category, ExtractionConfig, ExtractionRecord};

const TYPE_ID: &str = "recursoIndeferimentoNaoProvido";
const KEY_SLUG: &str = "recurso_nao_provido";

pub const DISPATCH_TYPE: &str = "Recurso não provido";
pub const DECISION: &str = "indeferido_mantido";

lazy_static! {
    static ref PETITION_NAME: Regex = Regex::new(
        r"(?is)Processo\s+[0-9]{9}\s+(.+?)\s+N[úu]mero\s+de\s+protocolo\s*:"
    ).unwrap();

    static ref PROTOCOL_NUMBER: Regex = Regex::new(
        r"(?i)N[úu]mero\s+de\s+protocolo\s*:\s*([0-9]{6,})"
    ).unwrap();

    static ref FILING_DATE: Regex = Regex::new(
        r"(?i)Data\s+de\s+apresenta[cç][aã]o\s*:\s*([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref APPLICANT: Regex = Regex::new(
        r"(?is)Requerente\s*:\s*(.+?)\s+Indeferimento\s+do\s+pedido"
    ).unwrap();

    static ref NOTIFICATION_DATE: Regex = Regex::new(
        r"(?i)Notificada\s+([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref DECISION_NAME: Regex = Regex::new(
        r"(?i)Recurso\s+n[ãa]o\s+provido\.?\s*Decis[aã]o\s+mantida"
    ).unwrap();

    static ref OPINION_DATE: Regex = Regex::new(
        r"(?i)Data\s+do\s+parecer\s*:\s*([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref OPINION_NUMBER: Regex = Regex::new(
        r"(?i)N[úu]mero\s+do\s+parecer\s*:\s*([0-9]{3,})"
    ).unwrap();

    static ref AUTOMATIC_TEXT_1: Regex = Regex::new(
        r"(?is)Processo\s+de\s+registro\s+de\s+marca.+?N[úu]mero\s+do\s+parecer\s*:\s*[0-9]+"
    ).unwrap();

    static ref AUTOMATIC_TEXT_2: Regex = Regex::new(
        r"(?is)(MINIST[ÉE]RIO\s+DO\s+DESENVOLVIMENTO,.+?)Decis[aã]o\s+tomada\s+pelo\s+Presidente"
    ).unwrap();

    // Ends at the examiner's signature line, the ministry header, the
    // presidency header or the end of the text.
    static ref OPINION: Regex = Regex::new(
        r"(?is)N[úu]mero\s+do\s+parecer\s*:\s*[0-9]+\s*(.+?)(?:\n(?-i:[A-ZÁÉÍÓÚÂÊÔÃÕÇ ]{3,})\s*\n\s*Delega[çc][ãa]o\s+de\s+compet[eê]ncia|\nMINIST[ÉE]RIO|\nPRESID[ÊE]NCIA|\z)"
    ).unwrap();

    // Names are printed in uppercase right before the delegation line
    static ref EXAMINER: Regex = Regex::new(
        r"(?:\.\s+|\n\s*)([A-ZÁÉÍÓÚÂÊÔÃÕÇ]+(?: [A-ZÁÉÍÓÚÂÊÔÃÕÇ]+)*)\s+(?i:Delega[çc][ãa]o\s+de\s+compet[eê]ncia)"
    ).unwrap();

    static ref EXAMINER_AFTER_CLOSING: Regex = Regex::new(
        r"(?is)à\s+considera[çc][ãa]o\s+superior\.?\s+(.+?)\s+Delega[çc][ãa]o\s+de\s+compet[eê]ncia"
    ).unwrap();

    static ref LEADING_UPPERCASE_NAME: Regex = Regex::new(
        r"^([A-ZÁÉÍÓÚÂÊÔÃÕÇ]+(?: [A-ZÁÉÍÓÚÂÊÔÃÕÇ]+)*)"
    ).unwrap();

    static ref DECISION_DATE: Regex = Regex::new(
        r"(?i)Data\s+da\s+decis[ãa]o\s+([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    static ref DENIAL_REASON: Regex = Regex::new(
        r"(?is)FOI\s+INDEFERIDO\s+COM\s+A\s+SEGUINTE\s+MOTIVA[ÇC][ÃA]O\s*:(.+?)(?:alega[çc][õo]es\s+da\s+requerente|Inicialmente|No\s+m[ée]rito|Ap[óo]s\s+ter\s+sido\s+examinado|\z)"
    ).unwrap();
}

pub struct TrademarkAppealDecisionExtractor {
    articles: ArticleExtractor,
}

impl TrademarkAppealDecisionExtractor {
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

    fn opinion_text(&self, text: &str) -> Option<String> {
        capture(&OPINION, text).map(|body| wrap_opinion(&body))
    }

    /// Examiner signing the opinion.
    fn examiner(&self, text: &str) -> Option<String> {
        if let Some(name) = capture(&EXAMINER, text) {
            return Some(name);
        }

        let raw = capture(&EXAMINER_AFTER_CLOSING, text)?;
        match capture(&LEADING_UPPERCASE_NAME, &raw) {
            Some(name) => Some(name),
            None => Some(raw),
        }
    }

    /// Decision date, falling back to the first date of the document.
    fn dispatch_date(&self, text: &str) -> Option<String> {
        capture(&DECISION_DATE, text).or_else(|| capture(&DATE_DMY, text))
    }
}

impl Default for TrademarkAppealDecisionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for TrademarkAppealDecisionExtractor {
    fn name(&self) -> &'static str {
        "TrademarkAppealDecisionExtractor"
    }

    fn schema_name(&self, _category: Category) -> &'static str {
        TYPE_ID
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord {
        let text = input.text;
        let mut record = input.start_record(Category::OfficialDocument, TYPE_ID, self.name());

        let process = ProcessNumberExtractor::new(ProcessScheme::TrademarkDecision)
            .extract(text)
            .map(|m| m.value);
        debug!(?process, "trademark decision process");

        record.set("process_number", process);
        record.set("dispatch_date", self.dispatch_date(text));
        record.set("petition_name", capture(&PETITION_NAME, text));
        record.set("protocol_number", capture(&PROTOCOL_NUMBER, text));
        record.set("filing_date", capture(&FILING_DATE, text));
        record.set("applicant", capture(&APPLICANT, text));
        record.set("denial_notification_date", capture(&NOTIFICATION_DATE, text));
        record.set(
            "decision_name",
            DECISION_NAME.find(text).map(|m| m.as_str().trim().to_string()),
        );
        record.set("opinion_date", capture(&OPINION_DATE, text));
        record.set("opinion_number", capture(&OPINION_NUMBER, text));
        record.set(
            "automatic_text_1",
            AUTOMATIC_TEXT_1.find(text).map(|m| m.as_str().trim().to_string()),
        );
        record.set("automatic_text_2", capture(&AUTOMATIC_TEXT_2, text));
        record.set("opinion_text", self.opinion_text(text));
        record.set("examiner", self.examiner(text));

        record.set("dispatch_type", DISPATCH_TYPE);
        record.set("cited_articles", self.articles.extract_all(text));
        record.set("decision", DECISION);
        record.set("denial_reason", capture(&DENIAL_REASON, text));
        record.set("prior_marks", extract_prior_marks(text));
        record.set("conflicting_processes", extract_related_processes(text));
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
    use crate::models::{ClassificationResult, Sector, OPINION_END_MARKER, OPINION_START_MARKER};
    use pretty_assertions::assert_eq;

    const DECISION_TEXT: &str = "Processo de registro de marca\n\
        Processo 912345678 Recurso contra indeferimento de pedido de registro de marca \
        Número de protocolo: 850240123456 Data de apresentação: 16/12/2024\n\
        Requerente: ACME INDÚSTRIA E COMÉRCIO LTDA Indeferimento do pedido Notificada 01/10/2024\n\
        Recurso não provido. Decisão mantida\n\
        Data do parecer: 26/01/2026\n\
        Número do parecer: 133221\n\
        Trata-se de recurso contra o indeferimento do pedido.\n\
        O PEDIDO FOI INDEFERIDO COM A SEGUINTE MOTIVAÇÃO: Reprodução ou imitação de marca alheia, \
        art. 124, inciso XIX da LPI.\n\
        Inicialmente, registre-se que o recurso é tempestivo.\n\
        MARCA(S) APONTADA(S) COMO IMPEDITIVA(S): 840000001 - MARCA A; 840000002 - MARCA B.\n\
        Após ter sido examinado o recurso, o conflito com o Processo 840000001 permanece. \
        Nos termos do art. 212 da LPI, à consideração superior.\n\
        RICARDO FREDERICO NICOL\n\
        Delegação de competência\n\
        MINISTÉRIO DO DESENVOLVIMENTO, INDÚSTRIA, COMÉRCIO E SERVIÇOS\n\
        INSTITUTO NACIONAL DA PROPRIEDADE INDUSTRIAL\n\
        Decisão tomada pelo Presidente\n\
        Data da decisão 28/01/2026";

    fn extract(text: &str) -> ExtractionRecord {
        let result = ClassificationResult {
            category: Category::OfficialDocument,
            type_id: TYPE_ID.to_string(),
            subtype_id: String::new(),
            confidence: 0.85,
            type_confidence: 0.8,
            original_type: "RECURSO_NAO_PROVIDO".to_string(),
            sector: Sector::Trademarks,
        };
        TrademarkAppealDecisionExtractor::new().extract(&ExtractionInput::new(text, &result))
    }

    #[test]
    fn test_identification_block() {
        let record = extract(DECISION_TEXT);

        assert_eq!(record.text("process_number"), Some("912345678"));
        assert_eq!(
            record.text("petition_name"),
            Some("Recurso contra indeferimento de pedido de registro de marca")
        );
        assert_eq!(record.text("protocol_number"), Some("850240123456"));
        assert_eq!(record.text("filing_date"), Some("16/12/2024"));
        assert_eq!(record.text("applicant"), Some("ACME INDÚSTRIA E COMÉRCIO LTDA"));
        assert_eq!(record.text("denial_notification_date"), Some("01/10/2024"));
        assert_eq!(record.text("decision_name"), Some("Recurso não provido. Decisão mantida"));
        assert_eq!(record.text("opinion_date"), Some("26/01/2026"));
        assert_eq!(record.text("opinion_number"), Some("133221"));
        assert_eq!(record.text("dispatch_date"), Some("28/01/2026"));
    }

    #[test]
    fn test_constants_and_lists() {
        let record = extract(DECISION_TEXT);

        assert_eq!(record.text("dispatch_type"), Some("Recurso não provido"));
        assert_eq!(record.text("decision"), Some("indeferido_mantido"));
        assert_eq!(
            record.value("cited_articles").as_list(),
            Some(&["Art. 124, inc. XIX".to_string()][..])
        );
        assert_eq!(
            record.value("prior_marks").as_list(),
            Some(&["840000001".to_string(), "840000002".to_string()][..])
        );
        assert_eq!(
            record.value("conflicting_processes").as_list(),
            Some(&["840000001".to_string()][..])
        );
    }

    #[test]
    fn test_opinion_examiner_and_reason() {
        let record = extract(DECISION_TEXT);

        let opinion = record.text("opinion_text").unwrap();
        assert!(opinion.starts_with(OPINION_START_MARKER));
        assert!(opinion.ends_with(OPINION_END_MARKER));
        assert!(opinion.contains("Trata-se de recurso"));
        assert!(opinion.contains("à consideração superior."));
        assert!(!opinion.contains("RICARDO"));

        assert_eq!(record.text("examiner"), Some("RICARDO FREDERICO NICOL"));
        assert_eq!(
            record.text("denial_reason"),
            Some("Reprodução ou imitação de marca alheia, art. 124, inciso XIX da LPI.")
        );
    }

    #[test]
    fn test_automatic_texts() {
        let record = extract(DECISION_TEXT);

        let first = record.text("automatic_text_1").unwrap();
        assert!(first.starts_with("Processo de registro de marca"));
        assert!(first.ends_with("Número do parecer: 133221"));

        assert_eq!(
            record.text("automatic_text_2"),
            Some("MINISTÉRIO DO DESENVOLVIMENTO, INDÚSTRIA, COMÉRCIO E SERVIÇOS\nINSTITUTO NACIONAL DA PROPRIEDADE INDUSTRIAL")
        );
    }

    #[test]
    fn test_dispatch_date_falls_back_to_first_date() {
        let record = extract("Processo 912345678 Notificada 01/10/2024");
        assert_eq!(record.text("dispatch_date"), Some("01/10/2024"));
        assert_eq!(record.text("examiner"), None);
        assert!(record.value("conflicting_processes").is_empty());
    }

    #[test]
    fn test_storage_key() {
        let record = extract(DECISION_TEXT);
        assert_eq!(
            TrademarkAppealDecisionExtractor::new().storage_key(&record),
            "doc_oficial_912345678_recurso_nao_provido"
        );
    }
}
