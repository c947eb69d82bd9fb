//! End-to-end processing: classify, extract, validate and optionally store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::DocumentClassifier;
use crate::error::Result;
use crate::extract::{self, ExtractionInput, ExtractionOutput};
use crate::models::{ClassificationResult, ExtractionConfig, InpiConfig};
use crate::storage::{RecordStore, StoredRecord};

/// Result of running one document through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub classification: ClassificationResult,
    pub extraction: ExtractionOutput,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl PipelineOutput {
    pub fn storage_key(&self) -> &str {
        &self.extraction.storage_key
    }

    /// Whether the record failed validation.
    pub fn needs_review(&self) -> bool {
        !self.extraction.validation.valid
    }
}

/// Classifier plus extraction settings, built once and reused per document.
#[derive(Debug, Clone, Default)]
pub struct DocumentPipeline {
    classifier: DocumentClassifier,
    extraction: ExtractionConfig,
}

impl DocumentPipeline {
    pub fn new(classifier: DocumentClassifier) -> Self {
        Self {
            classifier,
            extraction: ExtractionConfig::default(),
        }
    }

    pub fn from_config(config: &InpiConfig) -> Self {
        Self {
            classifier: DocumentClassifier::from_config(&config.classification),
            extraction: config.extraction.clone(),
        }
    }

    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.extraction = config;
        self
    }

    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }

    /// Classify and extract a document.
    pub fn process(&self, text: &str, source_url: &str) -> Result<PipelineOutput> {
        // chrono rather than Instant so timing also works under wasm32
        let start = Utc::now();

        let classification = self.classifier.classify(text)?;
        let input = ExtractionInput::new(text, &classification).with_source_url(source_url);
        let extraction = extract::extract(&input, &self.extraction)?;

        let output = PipelineOutput {
            classification,
            extraction,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        };

        info!(
            storage_key = %output.storage_key(),
            valid = !output.needs_review(),
            time_ms = output.processing_time_ms,
            "document processed"
        );

        Ok(output)
    }

    /// Process a document and put the record in `store`.
    ///
    /// Records failing validation are stored too, flagged for review.
    pub fn process_and_store(
        &self,
        text: &str,
        source_url: &str,
        store: &mut dyn RecordStore,
    ) -> Result<PipelineOutput> {
        let output = self.process(text, source_url)?;

        if output.needs_review() {
            warn!(storage_key = %output.storage_key(), "storing record flagged for review");
        }

        store.put(StoredRecord::from(output.extraction.clone()))?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Sector};
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    const TRADEMARK_APPEAL: &str = "Petição de Marca 850240123456\n\
        31123252330338563 16/12/2024 12:29 912345678 Número do Processo\n\
        Dados do Requerente\n\
        Nome/Razão Social: ACME INDÚSTRIA E COMÉRCIO LTDA\n\
        CPF/CNPJ/Número INPI: 12345678000199\n\
        Endereço: Rua das Flores, 100\n\
        Cidade: São Paulo\n\
        Estado: SP\n\
        CEP: 01000-000\n\
        País: BRASIL\n\
        Natureza Jurídica: Pessoa Jurídica\n\
        e-mail: contato@acme.com.br\n\
        Recurso contra indeferimento de pedido de registro de marca\n\
        Declaro, sob as penas da lei, que todas as informações são verdadeiras.";

    const TRADEMARK_DECISION: &str = "Processo de registro de marca\n\
        Processo 912345678 Recurso contra indeferimento de pedido de registro de marca \
        Número de protocolo: 850240123456 Data de apresentação: 16/12/2024\n\
        Recurso não provido. Decisão mantida\n\
        Número do parecer: 133221\n\
        Reprodução ou imitação de marca alheia, art. 124, inciso XIX da LPI.\n\
        Data da decisão 28/01/2026";

    const PATENT_APPEAL: &str = "Petição de Patente 870240012345\n\
        31123252330338563 16/12/2024\n\
        Enviado às 12:29\n\
        Número do Processo: BR 10 2020 012345 6\n\
        Dados do Depositante\n\
        Nome ou Razão Social: UNIVERSIDADE FEDERAL DE EXEMPLO\n\
        CPF/CNPJ: 12345678000199\n\
        Recurso contra indeferimento do pedido de patente\n\
        Declaro, sob as penas da lei, que todas as informações são verdadeiras.";

    const PATENT_DECISION: &str = "SERVIÇO PÚBLICO FEDERAL\n\
        INSTITUTO NACIONAL DA PROPRIEDADE INDUSTRIAL\n\
        N.° do Pedido: BR 10 2014 004206 7\n\
        Data de Depósito: 24/02/2014\n\
        O pedido foi indeferido com base nos artigos 8º c/c 13 da LPI.\n\
        Recurso conhecido e negado provimento. Mantido o indeferimento do pedido [código 111]\n\
        Rio de Janeiro, 5 de março de 2025.";

    #[test]
    fn test_field_counts_are_consistent_for_every_document_kind() {
        let fixtures = [
            (Sector::Trademarks, TRADEMARK_APPEAL, Category::Petition),
            (Sector::Trademarks, TRADEMARK_DECISION, Category::OfficialDocument),
            (Sector::Patents, PATENT_APPEAL, Category::Petition),
            (Sector::Patents, PATENT_DECISION, Category::OfficialDocument),
            (Sector::Trademarks, "Texto sem nenhum marcador conhecido", Category::Unknown),
        ];

        for (sector, text, category) in fixtures {
            let pipeline = DocumentPipeline::new(DocumentClassifier::new(sector));
            let output = pipeline.process(text, "").unwrap();
            let validation = &output.extraction.validation;

            assert_eq!(output.classification.category, category, "{}", text);
            assert!(validation.total_field_count > 0);
            assert!(
                validation.filled_field_count <= validation.total_field_count,
                "{}: {} filled of {}",
                output.storage_key(),
                validation.filled_field_count,
                validation.total_field_count
            );
            assert_eq!(
                validation.missing_fields.len() + validation.filled_field_count,
                validation.total_field_count,
                "{}",
                output.storage_key()
            );
        }
    }

    #[test]
    fn test_trademark_appeal_end_to_end() {
        let pipeline = DocumentPipeline::default();
        let output = pipeline
            .process(TRADEMARK_APPEAL, "https://example.org/peticao.pdf")
            .unwrap();

        assert_eq!(output.classification.category, Category::Petition);
        assert_eq!(output.classification.type_id, "recursoIndeferimentoPedidoRegistro");
        assert_eq!(output.extraction.record.extractor, "TrademarkAppealExtractor");
        assert_eq!(output.storage_key(), "peticao_912345678_recurso_indef_850240123456");
        assert_eq!(output.extraction.record.source_url, "https://example.org/peticao.pdf");
        assert!(output.extraction.warnings.is_empty());
        assert!(!output.needs_review(), "{:?}", output.extraction.validation.errors);
    }

    #[test]
    fn test_unknown_document_uses_generic_extractor() {
        let output = DocumentPipeline::default()
            .process("Texto sem nenhum marcador conhecido", "")
            .unwrap();

        assert_eq!(output.classification.category, Category::Unknown);
        assert_eq!(output.classification.confidence, 0.0);
        assert_eq!(output.extraction.record.extractor, "GenericExtractor");
        assert_eq!(output.extraction.record.type_id, "desconhecido_generico");
        assert_eq!(output.storage_key(), "desconhecido_sem_processo_generico");
        assert!(output.extraction.validation.valid);
        assert_eq!(
            output.extraction.validation.warnings,
            vec!["recommended field not filled: process_number"]
        );
    }

    #[test]
    fn test_empty_text_is_invalid_input() {
        let err = DocumentPipeline::default().process(" \n ", "").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_process_and_store_replaces_record() {
        let pipeline = DocumentPipeline::default();
        let mut store = MemoryStore::new();

        let first = pipeline
            .process_and_store(TRADEMARK_APPEAL, "a.pdf", &mut store)
            .unwrap();
        pipeline
            .process_and_store(TRADEMARK_APPEAL, "b.pdf", &mut store)
            .unwrap();

        assert_eq!(store.len(), 1);
        let stored = store.get(first.storage_key()).unwrap().unwrap();
        assert_eq!(stored.record.source_url, "b.pdf");
        assert!(!stored.needs_review);
    }

    #[test]
    fn test_from_config_applies_sector() {
        let mut config = InpiConfig::default();
        config.classification.sector = Sector::Patents;

        let pipeline = DocumentPipeline::from_config(&config);
        assert_eq!(pipeline.classifier().sector(), Sector::Patents);
    }
}
