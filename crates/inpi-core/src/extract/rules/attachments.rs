//! Attachment table reassembly.
//!
//! PDF text extraction breaks long file names across lines; entries are
//! rebuilt by joining lines until a known file extension closes the name.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::Attachment;

/// File extensions that terminate an attachment name.
pub const KNOWN_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "txt", "jpg", "png", "jpeg"];

lazy_static! {
    static ref TRADEMARK_BLOCK: Regex = Regex::new(
        r"(?is)Nome\s+do\s+Arquivo\s+Descri[çc][ãa]o\s*Anexos\s*(.*?)Declaro,\s+sob\s+as\s+penas\s+da\s+lei,"
    ).unwrap();

    static ref PATENT_BLOCK: Regex = Regex::new(
        r"(?is)Nome\s+Tipo\s+Anexo\s*(.*?)Documentos\s+anexados"
    ).unwrap();

    static ref ENDS_WITH_EXTENSION: Regex = Regex::new(
        r"(?i)\.(?:pdf|doc|docx|xls|xlsx|txt|jpg|png|jpeg)$"
    ).unwrap();

    // "procuracao.pdf Procuração"
    static ref NAME_THEN_TYPE: Regex = Regex::new(
        r"(?i)^(.*?\.(?:pdf|doc|docx|xls|xlsx|txt|jpg|png|jpeg))\s+(.+)$"
    ).unwrap();

    // "Procuração procuracao.pdf"
    static ref TYPE_THEN_NAME: Regex = Regex::new(
        r"(?i)^(.+?)\s+(.*?\.(?:pdf|doc|docx|xls|xlsx|txt|jpg|png|jpeg))$"
    ).unwrap();

    static ref PAGE_LINE: Regex = Regex::new(r"(?i)^P[áa]gina\s+[0-9]+").unwrap();

    static ref PETITION_NOTICE_LINE: Regex = Regex::new(r"(?i)^Esta\s+peti[çc][ãa]o").unwrap();
}

/// Column layout of an attachment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentLayout {
    /// Trademark form: "Nome do Arquivo | Descrição", closed by the declaration.
    NameThenType,
    /// Patent form: "Nome | Tipo Anexo" printed type first, closed by
    /// "Documentos anexados".
    TypeThenName,
}

/// Extract the attachment table of a petition.
pub fn extract_attachments(text: &str, layout: AttachmentLayout) -> Vec<Attachment> {
    let block = match layout {
        AttachmentLayout::NameThenType => &*TRADEMARK_BLOCK,
        AttachmentLayout::TypeThenName => &*PATENT_BLOCK,
    };

    let Some(caps) = block.captures(text) else {
        debug!(?layout, "attachment table not found");
        return Vec::new();
    };

    let lines: Vec<&str> = caps[1]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let attachments = match layout {
        AttachmentLayout::NameThenType => name_then_type(&lines),
        AttachmentLayout::TypeThenName => type_then_name(&lines),
    };

    debug!(?layout, count = attachments.len(), "attachments extracted");
    attachments
}

fn name_then_type(lines: &[&str]) -> Vec<Attachment> {
    let lines: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !PAGE_LINE.is_match(line) && !PETITION_NOTICE_LINE.is_match(line))
        .collect();

    let mut attachments = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some(caps) = NAME_THEN_TYPE.captures(lines[i]) {
            attachments.push(Attachment::new(caps[1].trim(), caps[2].trim()));
            i += 1;
            continue;
        }

        let mut name = lines[i].to_string();
        while i + 1 < lines.len() && !ENDS_WITH_EXTENSION.is_match(&name) {
            i += 1;
            name.push(' ');
            name.push_str(lines[i]);
        }

        // The description sits on the line after the name
        i += 1;
        match lines.get(i) {
            Some(attachment_type) => {
                attachments.push(Attachment::new(name, *attachment_type));
                i += 1;
            }
            None => {
                debug!(name = %name, "attachment name without description");
                break;
            }
        }
    }

    attachments
}

fn type_then_name(lines: &[&str]) -> Vec<Attachment> {
    let mut attachments = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let mut entry = lines[i].to_string();
        while i + 1 < lines.len() && !ENDS_WITH_EXTENSION.is_match(&entry) {
            i += 1;
            entry.push(' ');
            entry.push_str(lines[i]);
        }

        if let Some(caps) = TYPE_THEN_NAME.captures(&entry) {
            attachments.push(Attachment::new(caps[2].trim(), caps[1].trim()));
        }
        i += 1;
    }

    attachments
}
