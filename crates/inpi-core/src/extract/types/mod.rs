//! Type-specific extractors.

mod patent_appeal;
mod patent_appeal_decision;
mod trademark_appeal;
mod trademark_appeal_decision;

pub use patent_appeal::PatentAppealExtractor;
pub use patent_appeal_decision::PatentAppealDecisionExtractor;
pub use trademark_appeal::TrademarkAppealExtractor;
pub use trademark_appeal_decision::TrademarkAppealDecisionExtractor;

use tracing::debug;

use super::rules::{
    extract_attachments, extract_our_number, extract_petition_timestamp, header_window, Applicant,
    AttachmentLayout, Attorney, FieldExtractor, FilingForm, PetitionNumberExtractor,
    ProcessNumberExtractor, ProcessScheme,
};
use crate::models::ExtractionRecord;

/// Fill the fields shared by both petition forms: identifiers, applicant,
/// attorney, attachments and the full text.
///
/// Identification fields come from the first-page header only; the
/// attachment table is searched in the whole text.
fn fill_petition_fields(
    record: &mut ExtractionRecord,
    text: &str,
    form: FilingForm,
    header_chars: usize,
) {
    let header = header_window(text, header_chars);

    let (process_scheme, layout, split_timestamp) = match form {
        FilingForm::Trademark => (ProcessScheme::TrademarkForm, AttachmentLayout::NameThenType, false),
        FilingForm::Patent => (ProcessScheme::PatentForm, AttachmentLayout::TypeThenName, true),
    };

    let petition = PetitionNumberExtractor::new(form).extract(header);
    let process = ProcessNumberExtractor::new(process_scheme).extract(header);

    debug!(
        ?form,
        petition = ?petition.as_ref().map(|m| (&m.value, m.confidence)),
        process = ?process.as_ref().map(|m| (&m.value, m.confidence)),
        "petition identifiers"
    );

    record.set("petition_number", petition.map(|m| m.value));
    record.set("process_number", process.map(|m| m.value));
    record.set("our_number", extract_our_number(header));
    record.set("petition_date", extract_petition_timestamp(header, split_timestamp));

    let applicant = Applicant::extract(header, form);
    record.set("applicant_name", applicant.name);
    record.set("applicant_document", applicant.document);
    record.set("applicant_address", applicant.address);
    record.set("applicant_city", applicant.city);
    record.set("applicant_state", applicant.state);
    record.set("applicant_zip", applicant.zip_code);
    record.set("applicant_country", applicant.country);
    record.set("applicant_legal_nature", applicant.legal_nature);
    record.set("applicant_email", applicant.email);

    let attorney = Attorney::extract(header, form);
    record.set("attorney_name", attorney.name);
    record.set("attorney_cpf", attorney.cpf);
    record.set("attorney_email", attorney.email);
    record.set("attorney_api_number", attorney.api_number);
    record.set("attorney_oab_number", attorney.oab_number);
    record.set("attorney_uf", attorney.uf);
    record.set("firm_name", attorney.firm_name);
    record.set("firm_cnpj", attorney.firm_cnpj);

    record.set("full_text", text);
    record.set("attachments", extract_attachments(text, layout));
}
