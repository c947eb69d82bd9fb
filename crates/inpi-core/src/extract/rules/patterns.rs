//! Common regex patterns for INPI filing extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Petition numbers (12 digits)
    pub static ref PETITION_TRADEMARK_FORM: Regex = Regex::new(
        r"(?i)\bPeti[cç][ãa]o\s+de\s+Marca\s+([0-9]{12})\b"
    ).unwrap();

    pub static ref PETITION_PATENT_FORM: Regex = Regex::new(
        r"(?i)\bPeti[cç][ãa]o\s+de\s+Patente\s+([0-9]{12})\b"
    ).unwrap();

    pub static ref PETITION_LABELED: Regex = Regex::new(
        r"N[úu]mero\s+da\s+Peti[cç][ãa]o\s*:\s*([0-9]{12})\b"
    ).unwrap();

    pub static ref PETITION_BEFORE_LABEL: Regex = Regex::new(
        r"([0-9]{12})\s*N[úu]mero\s+da\s+Peti[cç][ãa]o"
    ).unwrap();

    pub static ref STANDALONE_12: Regex = Regex::new(r"\b([0-9]{12})\b").unwrap();

    // Process numbers (9 digits for trademarks, BR application numbers for patents)
    pub static ref PROCESS_LABELED: Regex = Regex::new(
        r"N[úu]mero\s+do\s+Processo\s*:\s*([0-9]{9})\b"
    ).unwrap();

    pub static ref PROCESS_AFTER_TIMESTAMP: Regex = Regex::new(
        r"\b[0-9]{2}/[0-9]{2}/[0-9]{4}\s+[0-9]{2}:[0-9]{2}\s+([0-9]{9})\s+N[úu]mero\s+do\s+Processo\b"
    ).unwrap();

    pub static ref PROCESS_BEFORE_LABEL: Regex = Regex::new(
        r"([0-9]{9})\s*N[úu]mero\s+do\s+Processo"
    ).unwrap();

    pub static ref PROCESS_HEADING: Regex = Regex::new(r"(?i)Processo\s+([0-9]{9})\b").unwrap();

    pub static ref STANDALONE_9: Regex = Regex::new(r"\b([0-9]{9})\b").unwrap();

    pub static ref BR_APPLICATION: Regex = Regex::new(
        r"(?i)\b(BR\s*[0-9]{2}\s*[0-9]{4}\s*[0-9]{6}[-\s]?[0-9]?)\b"
    ).unwrap();

    pub static ref BR_APPLICATION_LABELED: Regex = Regex::new(
        r"(?i)N[úu]mero\s+do\s+(?:Processo|Pedido)\s*:\s*(BR\s*[0-9\s-]+)"
    ).unwrap();

    pub static ref BR_APPLICATION_DECISION: Regex = Regex::new(
        r"(?i)N\.\s*[°º]\s+do\s+Pedido\s*:\s*(BR\s*[0-9]{2}\s*[0-9]{4}\s*[0-9]{6}[-\s]?[0-9]?)"
    ).unwrap();

    // Our-number (17 digits, dots allowed)
    pub static ref OUR_NUMBER: Regex = Regex::new(r"\b((?:[0-9]\.?){17})\b").unwrap();

    // Dates
    pub static ref TIMESTAMP: Regex = Regex::new(
        r"([0-9]{2}/[0-9]{2}/[0-9]{4})\s*([0-9]{2}:[0-9]{2})|([0-9]{2}:[0-9]{2})\s*([0-9]{2}/[0-9]{2}/[0-9]{4})"
    ).unwrap();

    pub static ref TIMESTAMP_SPLIT: Regex = Regex::new(
        r"(?s)([0-9]{2}/[0-9]{2}/[0-9]{4}).{0,50}?([0-9]{2}:[0-9]{2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(r"\b([0-9]{2}/[0-9]{2}/[0-9]{4})\b").unwrap();

    pub static ref LONG_DATE_RIO: Regex = Regex::new(
        r"(?i)Rio\s+de\s+Janeiro,\s+([0-9]{1,2})\s+de\s+(\w+)\s+de\s+([0-9]{4})"
    ).unwrap();

    // Cited articles: "art. 124, inciso XIX", "artigos 8º c/c 13"
    pub static ref ARTICLE: Regex = Regex::new(
        r"(?i)\b(?:artigos?|art)\s*\.?\s*([0-9]+)[°ºo]?(?:\s*,?\s*(?:inc|inciso)\s*\.?\s*([IVX]+)\b)?(?:\s*\.?\s*c/c\.?\s*(?:art(?:igo)?\s*\.?\s*)?([0-9]+))?"
    ).unwrap();

    // Section boundaries
    pub static ref DECLARATION: Regex = Regex::new(
        r"(?i)Declaro,\s+sob\s+as\s+penas\s+da\s+lei,"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"(?i)e-?mail\s*:\s*([\w.\-]+@[\w.\-]+)"
    ).unwrap();
}
