//! Applicant and attorney blocks of petition forms.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::EMAIL;
use super::{capture, capture_collapsed, FilingForm};
use crate::text::digits_only;

lazy_static! {
    // Trademark form: applicant
    static ref TM_APPLICANT_NAME: Regex = Regex::new(
        r"(?s)Nome(?:\s*/\s*Raz[ãa]o\s+Social)?\s*:\s*(.*?)\s*CPF/CNPJ/N[úu]mero\s+INPI\s*:"
    ).unwrap();
    static ref TM_APPLICANT_DOCUMENT: Regex = Regex::new(
        r"(?is)CPF/CNPJ/N[úu]mero\s+INPI\s*:\s*(.*?)\s*(?:Endere[cç]o|Cidade|Estado|CEP|Pa[ií]s|Natureza\s+Jur[íi]dica|e-?mail|Dados\s+Gerais|Dados\s+do\s+Procurador/Escrit[óo]rio)\b"
    ).unwrap();
    static ref TM_ZIP: Regex = Regex::new(r"(?s)CEP:\s*(.*?)\s*Pa[ií]s:").unwrap();
    static ref TM_COUNTRY: Regex = Regex::new(
        r"(?s)Pa[ií]s\s*:\s*(.*?)\s*Natureza\s+Jur[íi]dica\s*:"
    ).unwrap();
    static ref TM_LEGAL_NATURE: Regex = Regex::new(
        r"(?is)Natureza\s+Jur[íi]dica\s*:\s*(.*?)\s*e-?mail\s*:"
    ).unwrap();

    // Both forms: address block
    static ref ADDRESS: Regex = Regex::new(r"(?s)Endere[çc]o:\s*(.*?)\s*Cidade:").unwrap();
    static ref CITY: Regex = Regex::new(r"(?s)Cidade:\s*(.*?)\s*Estado:").unwrap();
    static ref STATE: Regex = Regex::new(r"(?s)Estado:\s*(.*?)\s*CEP:").unwrap();

    // Trademark form: attorney
    static ref TM_ATTORNEY_CPF: Regex = Regex::new(r"CPF\s*:\s*([0-9.\-]{11,})").unwrap();
    static ref TM_ATTORNEY_NAME: Regex = Regex::new(
        r"(?s)CPF\s*:\s*[0-9.\-]{11,}\s*Nome\s*:\s*(.*?)\s*UF\s*:"
    ).unwrap();
    static ref TM_ATTORNEY_UF: Regex = Regex::new(r"UF\s*:\s*(\w{2})").unwrap();
    static ref OAB_NUMBER: Regex = Regex::new(r"N[ºo°]\s*OAB\s*:\s*([0-9][0-9\s]{0,15})").unwrap();
    static ref TM_API_NUMBER: Regex = Regex::new(
        r"(?is)N[ºo°]\s*API\s*:\s*(.*?)\s*e-?mail\s*:"
    ).unwrap();
    static ref TM_ATTORNEY_EMAIL: Regex = Regex::new(
        r"(?is)N[ºo°]\s*API\s*:.*?e-?mail\s*:\s*([\w.\-]+@[\w.\-]+)"
    ).unwrap();
    static ref TM_FIRM_CNPJ: Regex = Regex::new(
        r"Dados\s+do\s+Procurador/Escrit[óo]rio\s*([0-9]{14})"
    ).unwrap();
    static ref TM_FIRM_NAME: Regex = Regex::new(
        r"(?s)[0-9]{14}\s*CNPJ\s*:\s*Nome\s*:\s*(.*?)\s*N[ºo°]\s*API\s*:"
    ).unwrap();

    // Patent form: applicant
    static ref PT_APPLICANT_NAME: Regex = Regex::new(
        r"(?s)Nome\s+ou\s+Raz[ãa]o\s+Social\s*:\s*(.*?)\s*(?:Tipo\s+de\s+Pessoa|CPF/CNPJ)"
    ).unwrap();
    static ref PT_APPLICANT_DOCUMENT: Regex = Regex::new(
        r"Dados\s+do\s+Depositante(?s:.*?)CPF/CNPJ\s*:\s*([0-9]+)"
    ).unwrap();
    static ref PT_ZIP: Regex = Regex::new(r"CEP\s*:\s*([0-9-]+)").unwrap();
    static ref PT_COUNTRY: Regex = Regex::new(
        r"(?s)Pa[ií]s\s*:\s*(.*?)\s*(?:Telefone|Fax|Email|Refer[êe]ncia)"
    ).unwrap();
    static ref PT_LEGAL_NATURE: Regex = Regex::new(
        r"(?is)Qualifica[çc][ãa]o\s+Jur[íi]dica\s*:\s*(.*?)\s*(?:Endere[çc]o|CPF)"
    ).unwrap();

    // Patent form: attorney ("Procurador:" section)
    static ref PT_ATTORNEY_CPF: Regex = Regex::new(
        r"Procurador\s*:(?s:.*?)CPF/CNPJ\s*:\s*([0-9]+)"
    ).unwrap();
    static ref PT_ATTORNEY_NAME: Regex = Regex::new(
        r"(?i)Procurador\s*:(?s:.*?)Nome\s+ou\s+Raz[ãa]o\s+Social\s*:\s*(.*?)\s*(?:Numero\s+OAB|CPF)"
    ).unwrap();
    static ref PT_ATTORNEY_STATE: Regex = Regex::new(
        r"Procurador\s*:(?s:.*?)Estado\s*:\s*(\w{2})"
    ).unwrap();
    static ref PT_API_NUMBER: Regex = Regex::new(r"Numero\s+API\s*:\s*([0-9]+)").unwrap();
    static ref PT_ATTORNEY_EMAIL: Regex = Regex::new(
        r"Procurador\s*:(?s:.*?)Email\s*:\s*([\w.\-]+@[\w.\-]+)"
    ).unwrap();
    static ref PT_ATTORNEY_SECTION: Regex = Regex::new(r"(?s)Dados\s+do\s+Procurador.*").unwrap();
    static ref PT_DOCUMENT: Regex = Regex::new(r"CPF/CNPJ\s*:\s*([0-9]+)").unwrap();
    static ref PT_FIRM_NAME: Regex = Regex::new(
        r"(?i)Email\s*:[^\n]*\n(?s:.*?)Nome\s+ou\s+Raz[ãa]o\s+Social\s*:\s*(.*?)\s*CPF/CNPJ"
    ).unwrap();
}

/// Applicant (requerente / depositante) block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applicant {
    pub name: Option<String>,
    /// CPF, CNPJ or INPI registration number.
    pub document: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub legal_nature: Option<String>,
    pub email: Option<String>,
}

impl Applicant {
    /// Read the applicant block of a petition header.
    pub fn extract(header: &str, form: FilingForm) -> Self {
        match form {
            FilingForm::Trademark => Self {
                name: capture_collapsed(&TM_APPLICANT_NAME, header),
                document: capture(&TM_APPLICANT_DOCUMENT, header),
                address: capture(&ADDRESS, header),
                city: capture(&CITY, header),
                state: capture(&STATE, header),
                zip_code: capture(&TM_ZIP, header),
                country: capture(&TM_COUNTRY, header),
                legal_nature: capture(&TM_LEGAL_NATURE, header),
                email: capture(&EMAIL, header),
            },
            FilingForm::Patent => Self {
                name: capture_collapsed(&PT_APPLICANT_NAME, header),
                document: capture(&PT_APPLICANT_DOCUMENT, header),
                address: capture(&ADDRESS, header),
                city: capture(&CITY, header),
                state: capture(&STATE, header),
                zip_code: capture(&PT_ZIP, header),
                country: capture(&PT_COUNTRY, header),
                legal_nature: capture(&PT_LEGAL_NATURE, header),
                email: capture(&EMAIL, header),
            },
        }
    }
}

/// Attorney (procurador) block, including the law firm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attorney {
    pub name: Option<String>,
    /// 11-digit CPF.
    pub cpf: Option<String>,
    pub email: Option<String>,
    /// Industrial property agent number.
    pub api_number: Option<String>,
    /// Bar association number.
    pub oab_number: Option<String>,
    pub uf: Option<String>,
    pub firm_name: Option<String>,
    pub firm_cnpj: Option<String>,
}

impl Attorney {
    /// Read the attorney block of a petition header.
    pub fn extract(header: &str, form: FilingForm) -> Self {
        match form {
            FilingForm::Trademark => Self {
                name: capture_collapsed(&TM_ATTORNEY_NAME, header),
                cpf: capture(&TM_ATTORNEY_CPF, header).and_then(|raw| cpf_digits(&raw)),
                email: capture(&TM_ATTORNEY_EMAIL, header),
                api_number: capture(&TM_API_NUMBER, header),
                oab_number: oab_number(header),
                uf: capture(&TM_ATTORNEY_UF, header),
                firm_name: capture_collapsed(&TM_FIRM_NAME, header),
                firm_cnpj: capture(&TM_FIRM_CNPJ, header),
            },
            FilingForm::Patent => Self {
                name: capture_collapsed(&PT_ATTORNEY_NAME, header),
                cpf: capture(&PT_ATTORNEY_CPF, header).and_then(|raw| cpf_digits(&raw)),
                email: capture(&PT_ATTORNEY_EMAIL, header),
                api_number: capture(&PT_API_NUMBER, header),
                oab_number: oab_number(header),
                uf: capture(&PT_ATTORNEY_STATE, header),
                firm_name: capture_collapsed(&PT_FIRM_NAME, header),
                firm_cnpj: patent_firm_cnpj(header),
            },
        }
    }
}

/// Digits of a CPF, kept only when exactly 11 remain.
fn cpf_digits(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    (digits.len() == 11).then_some(digits)
}

fn oab_number(text: &str) -> Option<String> {
    capture(&OAB_NUMBER, text)
        .map(|raw| raw.split_whitespace().collect::<String>())
        .filter(|s| !s.is_empty())
}

/// The firm's CNPJ is the second CPF/CNPJ printed after "Dados do Procurador".
fn patent_firm_cnpj(text: &str) -> Option<String> {
    let section = PT_ATTORNEY_SECTION.find(text)?;
    PT_DOCUMENT
        .captures_iter(section.as_str())
        .nth(1)
        .map(|caps| caps[1].to_string())
}
