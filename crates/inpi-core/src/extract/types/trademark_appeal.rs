//! Trademark appeal against refusal ("Recurso contra indeferimento de
//! pedido de registro de marca"), filed through the e-Marcas form.

use super::fill_petition_fields;
use crate::extract::rules::{petition_narrative, FilingForm};
use crate::extract::{storage_key, DocumentExtractor, ExtractionInput};
use crate::models::{Category, ExtractionConfig, ExtractionRecord};

const TYPE_ID: &str = "recursoIndeferimentoPedidoRegistro";
const KEY_SLUG: &str = "recurso_indef";

pub struct TrademarkAppealExtractor {
    header_chars: usize,
}

impl TrademarkAppealExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header_chars: config.header_window_chars,
        }
    }

    /// Set the header window used when the declaration marker is missing.
    pub fn with_header_chars(mut self, chars: usize) -> Self {
        self.header_chars = chars;
        self
    }
}

impl Default for TrademarkAppealExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for TrademarkAppealExtractor {
    fn name(&self) -> &'static str {
        "TrademarkAppealExtractor"
    }

    fn schema_name(&self, _category: Category) -> &'static str {
        TYPE_ID
    }

    fn extract(&self, input: &ExtractionInput<'_>) -> ExtractionRecord {
        let mut record = input.start_record(Category::Petition, TYPE_ID, self.name());

        fill_petition_fields(&mut record, input.text, FilingForm::Trademark, self.header_chars);
        record.set("petition_text", petition_narrative(input.text));

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
