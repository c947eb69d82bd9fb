//! Patent appeal against refusal, filed through the e-Patentes form.

use super::fill_petition_fields;
use crate::extract::rules::FilingForm;
use crate::extract::{storage_key, DocumentExtractor, ExtractionInput};
use crate::models::{Category, ExtractionConfig, ExtractionRecord};

const TYPE_ID: &str = "recursoIndeferimentoPedidoPatente";
const KEY_SLUG: &str = "recurso_indef_patente";

pub struct PatentAppealExtractor {
    header_chars: usize,
}

impl PatentAppealExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header_chars: config.header_window_chars,
        }
    }

    pub fn with_header_chars(mut self, chars: usize) -> Self {
        self.header_chars = chars;
        self
    }
}

impl Default for PatentAppealExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for PatentAppealExtractor {
    fn name(&self) -> &'static str {
        "PatentAppealExtractor"
    }

    fn schema_name(&self, _category: Category) -> &'static str {
        TYPE_ID
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord {
        let mut record = input.start_record(Category::Petition, TYPE_ID, self.name());
        fill_petition_fields(&mut record, input.text, FilingForm::Patent, self.header_chars);
        record
    }

    fn storage_key(&self, record: &ExtractionRecord) -> String {
        storage_key(
            Category::Petition,
            record.text("process_number"),
            KEY_SLUG,
            record.text("petition_number"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, ClassificationResult, FieldValue, Sector};
    use pretty_assertions::assert_eq;

    const PETITION: &str = "Petição de Patente 870240012345\n\
        31123252330338563 16/12/2024\n\
        Enviado às 12:29\n\
        Número do Processo: BR 10 2020 012345 6\n\
        Dados do Depositante\n\
        Nome ou Razão Social: UNIVERSIDADE FEDERAL DE EXEMPLO\n\
        Tipo de Pessoa: Pessoa Jurídica\n\
        CPF/CNPJ: 12345678000199\n\
        Qualificação Jurídica: Instituição de Ensino e Pesquisa\n\
        Endereço: Av. Central, 1\n\
        Cidade: Belo Horizonte\n\
        Estado: MG\n\
        CEP: 30000-000\n\
        País: Brasil\n\
        Telefone: 31 0000-0000\n\
        Email: patentes@ufe.br\n\
        Dados do Procurador\n\
        Procurador:\n\
        Nome ou Razão Social: MARIA SOUZA\n\
        Numero OAB: 98765\n\
        Numero API: 4321\n\
        CPF/CNPJ: 98765432100\n\
        Estado: RJ\n\
        Email: maria@souza.com\n\
        Escritório:\n\
        Nome ou Razão Social: SOUZA MARCAS E PATENTES\n\
        CPF/CNPJ: 55666777000188\n\
        Recurso contra indeferimento do pedido de patente\n\
        Nome Tipo Anexo\n\
        Procuração procuracao.pdf\n\
        Relatório Descritivo relatorio_\nfinal.docx\n\
        Documentos anexados\n\
        Declaro, sob as penas da lei, que todas as informações são verdadeiras.";

    fn extract(text: &str) -> ExtractionRecord {
        let result = ClassificationResult {
            category: Category::Petition,
            type_id: TYPE_ID.to_string(),
            subtype_id: String::new(),
            confidence: 0.85,
            type_confidence: 0.92,
            original_type: "RECURSO_INDEFERIMENTO".to_string(),
            sector: Sector::Patents,
        };
        PatentAppealExtractor::new().extract(&ExtractionInput::new(text, &result))
    }

    #[test]
    fn test_patent_identifiers() {
        let record = extract(PETITION);

        assert_eq!(record.sector, Sector::Patents);
        assert_eq!(record.text("petition_number"), Some("870240012345"));
        assert_eq!(record.text("process_number"), Some("BR1020200123456"));
        assert_eq!(record.text("our_number"), Some("31123252330338563"));
        assert_eq!(record.text("petition_date"), Some("16/12/2024 12:29"));
    }

    #[test]
    fn test_depositor_and_attorney() {
        let record = extract(PETITION);

        assert_eq!(record.text("applicant_name"), Some("UNIVERSIDADE FEDERAL DE EXEMPLO"));
        assert_eq!(record.text("applicant_document"), Some("12345678000199"));
        assert_eq!(record.text("applicant_legal_nature"), Some("Instituição de Ensino e Pesquisa"));
        assert_eq!(record.text("applicant_state"), Some("MG"));
        assert_eq!(record.text("attorney_name"), Some("MARIA SOUZA"));
        assert_eq!(record.text("attorney_cpf"), Some("98765432100"));
        assert_eq!(record.text("attorney_api_number"), Some("4321"));
        assert_eq!(record.text("attorney_uf"), Some("RJ"));
        assert_eq!(record.text("firm_name"), Some("SOUZA MARCAS E PATENTES"));
        assert_eq!(record.text("firm_cnpj"), Some("55666777000188"));
        assert_eq!(record.fields.get("attorney_oab_number"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_patent_attachments() {
        let record = extract(PETITION);

        assert_eq!(
            record.fields.get("attachments"),
            Some(&FieldValue::Attachments(vec![
                Attachment::new("procuracao.pdf", "Procuração"),
                Attachment::new("Descritivo relatorio_ final.docx", "Relatório"),
            ]))
        );
        assert!(record.fields.get("petition_text").is_none());
    }

    #[test]
    fn test_storage_key_slugifies_application_number() {
        let record = extract(PETITION);
        assert_eq!(
            PatentAppealExtractor::new().storage_key(&record),
            "peticao_br1020200123456_recurso_indef_patente_870240012345"
        );
    }
}
