//! Type detection within a category.
//!
//! Detection order: an explicit structural cue (`tipoPeticao: ...`), then a
//! priority-ordered keyword table (specific phrases before generic ones),
//! then the generic label of the category.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{Category, Sector};

/// Confidence of a type read from a structural cue.
pub const STRUCTURAL_CUE_CONFIDENCE: f32 = 0.95;

/// Confidence of the generic fallback.
pub const GENERIC_TYPE_CONFIDENCE: f32 = 0.3;

/// One keyword rule of a type table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    /// Legacy label (e.g. `OPOSICAO`).
    pub label: &'static str,
    /// Lowercase trigger phrases, checked in order.
    pub phrases: &'static [&'static str],
}

/// Petition types, most specific first.
pub const PETITION_RULES: &[TypeRule] = &[
    TypeRule {
        label: "RECURSO_INDEFERIMENTO",
        phrases: &[
            "recurso contra o indeferimento",
            "recurso contra indeferimento",
            "indeferimento",
            "recurso contra a decisão",
        ],
    },
    TypeRule {
        label: "OPOSICAO",
        phrases: &["manifesta oposição", "apresenta oposição", "oposição", "oposicao"],
    },
    TypeRule {
        label: "MANIFESTACAO",
        phrases: &["vem manifestar", "manifesta-se", "manifestação", "manifestacao"],
    },
    TypeRule {
        label: "CONTESTACAO",
        phrases: &["vem contestar", "contestação", "contestacao", "contesta"],
    },
    TypeRule {
        label: "NULIDADE",
        phrases: &["ação de nulidade", "pedido de nulidade", "nulidade", "anulação", "anulacao"],
    },
    TypeRule {
        label: "CADUCIDADE",
        phrases: &["declaração de caducidade", "pedido de caducidade", "caducidade"],
    },
    TypeRule {
        label: "PEDIDO_REGISTRO",
        phrases: &["pedido de registro", "requer o registro", "apresenta pedido"],
    },
    TypeRule {
        label: "RECURSO_EXIGENCIA",
        phrases: &["recurso contra exigência", "recurso de exigência", "exigência técnica"],
    },
    TypeRule {
        label: "CUMPRIMENTO_EXIGENCIA",
        phrases: &["cumprimento de exigência", "atendimento de exigência", "cumpre exigência"],
    },
    TypeRule {
        label: "JUNTADA_DOCUMENTO",
        phrases: &["juntada de documento", "apresenta documento", "junta aos autos"],
    },
];

/// Official document types, most specific first.
pub const OFFICIAL_DOCUMENT_RULES: &[TypeRule] = &[
    TypeRule {
        label: "RECURSO_NAO_PROVIDO",
        phrases: &[
            "recurso não provido",
            "recurso nao provido",
            "não se provê o recurso",
            "mantida a decisão de indeferimento",
            "decisão mantida",
        ],
    },
    TypeRule {
        label: "DESPACHO_DECISORIO",
        phrases: &["despacho decisório", "despacho de decisão", "decide"],
    },
    TypeRule {
        label: "NOTIFICACAO_EXIGENCIA",
        phrases: &["notificação de exigência", "exigência técnica", "exige-se"],
    },
    TypeRule {
        label: "NOTIFICACAO_OPOSICAO",
        phrases: &["notificação de oposição", "ciência de oposição"],
    },
    TypeRule {
        label: "INTIMACAO",
        phrases: &["intimação", "intima-se", "fica intimado"],
    },
    TypeRule {
        label: "PARECER_TECNICO",
        phrases: &["parecer técnico", "parecer do inpi", "análise técnica"],
    },
];

lazy_static! {
    static ref STRUCTURAL_CUE: Regex = Regex::new(
        r#"(?i)(?:tipoPeticao|tipo_da_peticao|tipoDocumento)\s*:\s*["']?([a-z_]+(?:[ \t]+[a-z_]+)*)"#
    ).unwrap();

    /// Patent appeal petitions.
    static ref PATENT_APPEAL_PATTERNS: Vec<Regex> = [
        r"(?i)recurso\s+contra\s+indeferimento",
        r"(?i)recurs[os]?\s+administrativo",
        r"(?i)recurso\s+ao\s+presidente",
        r"(?i)impugna[çc][ãa]o\s+ao\s+indeferimento",
        r"(?i)despacho\s+de\s+indeferimento",
        r"(?i)pedido\s+de\s+patente.*?indeferid[oa]",
        r"(?i)patente.*?indeferimento",
        r"(?i)inven[çc][ãa]o.*?indeferid[oa]",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Patent appeal-denied decisions.
    static ref PATENT_APPEAL_DENIED_PATTERNS: Vec<Regex> = [
        r"(?i)recurso\s+n[ãa]o\s+provido",
        r"(?i)recurso\s+administrativo.*?n[ãa]o\s+provido",
        r"(?i)n[ãa]o\s+se\s+prov[êe]\s+o\s+recurso",
        r"(?i)mantida\s+a\s+decis[ãa]o\s+de\s+indeferimento",
        r"(?i)recurso.*?indeferido",
        r"(?i)decis[ãa]o.*?mantida",
        r"(?i)pedido\s+de\s+patente.*?indeferimento",
        r"(?i)patente.*?n[ãa]o\s+provido",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

/// How a keyword match is turned into a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceModel {
    /// `min(0.95, 0.6 + 0.1 * occurrences)` of the trigger phrase.
    Repetition,
    /// `min(1.0, matched / total * 1.2 + 0.2)` over corroborating patterns.
    Corroboration,
}

impl ConfidenceModel {
    pub fn for_sector(sector: Sector) -> Self {
        match sector {
            Sector::Trademarks => ConfidenceModel::Repetition,
            Sector::Patents => ConfidenceModel::Corroboration,
        }
    }
}

/// Repetition confidence for `occurrences` hits of the trigger phrase.
pub fn repetition_confidence(occurrences: usize) -> f32 {
    (0.6 + 0.1 * occurrences as f32).min(0.95)
}

/// Corroboration confidence for `matched` of `total` patterns.
pub fn corroboration_confidence(matched: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (matched as f32 / total as f32 * 1.2 + 0.2).min(1.0)
}

/// Outcome of the type stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMatch {
    /// Canonical type id; empty for the generic fallback.
    pub type_id: String,
    /// Legacy label.
    pub label: String,
    /// Type confidence in [0, 1].
    pub confidence: f32,
}

impl TypeMatch {
    fn generic(category: Category) -> Self {
        Self {
            type_id: String::new(),
            label: category.generic_label().to_string(),
            confidence: GENERIC_TYPE_CONFIDENCE,
        }
    }
}

/// Keyword table of a category.
pub fn rules_for(category: Category) -> &'static [TypeRule] {
    match category {
        Category::Petition => PETITION_RULES,
        Category::OfficialDocument => OFFICIAL_DOCUMENT_RULES,
        Category::Unknown => &[],
    }
}

/// Canonical id of a table label; sector overrides win for types that have
/// a dedicated extractor.
pub fn canonical_type_id(label: &str, category: Category, sector: Sector) -> String {
    let sector_override = match (category, sector, label) {
        (Category::Petition, Sector::Trademarks, "RECURSO_INDEFERIMENTO") => {
            Some("recursoIndeferimentoPedidoRegistro")
        }
        (Category::Petition, Sector::Patents, "RECURSO_INDEFERIMENTO") => {
            Some("recursoIndeferimentoPedidoPatente")
        }
        (Category::OfficialDocument, Sector::Trademarks, "RECURSO_NAO_PROVIDO") => {
            Some("recursoIndeferimentoNaoProvido")
        }
        (Category::OfficialDocument, Sector::Patents, "RECURSO_NAO_PROVIDO") => {
            Some("recursoIndeferimentoNaoProvidoPatente")
        }
        _ => None,
    };

    match sector_override {
        Some(id) => id.to_string(),
        None => format!("{}_{}", category.type_prefix(), label.to_lowercase()),
    }
}

fn corroborating_patterns(label: &str, sector: Sector) -> &'static [Regex] {
    match (sector, label) {
        (Sector::Patents, "RECURSO_INDEFERIMENTO") => PATENT_APPEAL_PATTERNS.as_slice(),
        (Sector::Patents, "RECURSO_NAO_PROVIDO") => PATENT_APPEAL_DENIED_PATTERNS.as_slice(),
        _ => &[],
    }
}

/// Category-scoped type classifier for one sector.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    sector: Sector,
    confidence_model: ConfidenceModel,
}

impl TypeClassifier {
    pub fn new(sector: Sector) -> Self {
        Self {
            sector,
            confidence_model: ConfidenceModel::for_sector(sector),
        }
    }

    pub fn with_confidence_model(mut self, model: ConfidenceModel) -> Self {
        self.confidence_model = model;
        self
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// Determine the type of `text` within `category`.
    ///
    /// Unknown documents get an empty match with zero confidence.
    pub fn classify(&self, text: &str, category: Category) -> TypeMatch {
        if category == Category::Unknown {
            return TypeMatch {
                type_id: String::new(),
                label: String::new(),
                confidence: 0.0,
            };
        }

        if let Some(found) = self.structural_cue(text, category) {
            return found;
        }

        if let Some(found) = self.keyword_match(text, category) {
            return found;
        }

        debug!("no type rule matched; using {}", category.generic_label());
        TypeMatch::generic(category)
    }

    fn structural_cue(&self, text: &str, category: Category) -> Option<TypeMatch> {
        let caps = STRUCTURAL_CUE.captures(text)?;
        let label = caps[1].trim().to_uppercase().split_whitespace().collect::<Vec<_>>().join("_");
        debug!(label = %label, "type read from structural cue");

        if label == category.generic_label() {
            return Some(TypeMatch {
                type_id: String::new(),
                label,
                confidence: STRUCTURAL_CUE_CONFIDENCE,
            });
        }

        Some(TypeMatch {
            type_id: canonical_type_id(&label, category, self.sector),
            label,
            confidence: STRUCTURAL_CUE_CONFIDENCE,
        })
    }

    fn keyword_match(&self, text: &str, category: Category) -> Option<TypeMatch> {
        let lower = text.to_lowercase();

        for rule in rules_for(category) {
            let patterns: &[Regex] = match self.confidence_model {
                ConfidenceModel::Corroboration => corroborating_patterns(rule.label, self.sector),
                ConfidenceModel::Repetition => &[],
            };
            let phrase = rule.phrases.iter().find(|p| lower.contains(*p));
            let corroborated = patterns.iter().filter(|p| p.is_match(text)).count();

            if phrase.is_none() && corroborated == 0 {
                continue;
            }

            let confidence = if patterns.is_empty() {
                let occurrences = phrase.map(|p| lower.matches(p).count()).unwrap_or(0);
                repetition_confidence(occurrences)
            } else {
                corroboration_confidence(corroborated, patterns.len())
            };

            debug!(
                label = rule.label,
                phrase = phrase.copied().unwrap_or(""),
                corroborated,
                confidence,
                "type keyword rule matched"
            );

            return Some(TypeMatch {
                type_id: canonical_type_id(rule.label, category, self.sector),
                label: rule.label.to_string(),
                confidence,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repetition_confidence_is_monotonic_and_capped() {
        let mut previous = 0.0;
        for n in 0..20 {
            let c = repetition_confidence(n);
            assert!(c >= previous);
            assert!(c <= 0.95);
            previous = c;
        }
        assert_eq!(repetition_confidence(50), 0.95);
    }

    #[test]
    fn test_corroboration_confidence() {
        assert_eq!(corroboration_confidence(8, 8), 1.0);
        assert!((corroboration_confidence(2, 8) - 0.5).abs() < 1e-6);
        assert_eq!(corroboration_confidence(0, 0), 0.0);
    }

    #[test]
    fn test_trademark_appeal_keyword() {
        let classifier = TypeClassifier::new(Sector::Trademarks);
        let found = classifier.classify(
            "Recurso contra indeferimento de pedido de registro de marca",
            Category::Petition,
        );
        assert_eq!(found.type_id, "recursoIndeferimentoPedidoRegistro");
        assert_eq!(found.label, "RECURSO_INDEFERIMENTO");
        assert!((found.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_more_occurrences_raise_confidence() {
        let classifier = TypeClassifier::new(Sector::Trademarks);
        let once = classifier.classify("apresenta oposição ao pedido", Category::Petition);
        let twice = classifier.classify(
            "apresenta oposição ao pedido; apresenta oposição novamente",
            Category::Petition,
        );
        assert_eq!(once.type_id, "pet_oposicao");
        assert!(twice.confidence > once.confidence);
    }

    #[test]
    fn test_official_document_denied_appeal() {
        let classifier = TypeClassifier::new(Sector::Trademarks);
        let found = classifier.classify(
            "Indeferimento do pedido\nRecurso não provido. Decisão mantida",
            Category::OfficialDocument,
        );
        assert_eq!(found.type_id, "recursoIndeferimentoNaoProvido");
        assert_eq!(found.label, "RECURSO_NAO_PROVIDO");
    }

    #[test]
    fn test_patent_corroboration() {
        let classifier = TypeClassifier::new(Sector::Patents);
        let found = classifier.classify(
            "Recurso administrativo contra despacho de indeferimento do pedido de patente",
            Category::Petition,
        );
        assert_eq!(found.type_id, "recursoIndeferimentoPedidoPatente");
        assert!(found.confidence > 0.2 && found.confidence <= 1.0);
    }

    #[test]
    fn test_structural_cue_wins() {
        let classifier = TypeClassifier::new(Sector::Trademarks);
        let found = classifier.classify(
            "tipoPeticao: oposicao\nrecurso contra indeferimento",
            Category::Petition,
        );
        assert_eq!(found.type_id, "pet_oposicao");
        assert_eq!(found.confidence, STRUCTURAL_CUE_CONFIDENCE);

        let found = classifier.classify("tipoDocumento: \"parecer tecnico\"", Category::OfficialDocument);
        assert_eq!(found.label, "PARECER_TECNICO");
        assert_eq!(found.type_id, "doc_oficial_parecer_tecnico");
    }

    #[test]
    fn test_generic_fallback() {
        let classifier = TypeClassifier::new(Sector::Trademarks);
        let found = classifier.classify("texto sem palavras-chave", Category::OfficialDocument);
        assert_eq!(found.type_id, "");
        assert_eq!(found.label, "DOC_OFICIAL_GENERICO");
        assert_eq!(found.confidence, GENERIC_TYPE_CONFIDENCE);
    }

    #[test]
    fn test_unknown_category_skips_type_stage() {
        let classifier = TypeClassifier::new(Sector::Patents);
        let found = classifier.classify("recurso não provido", Category::Unknown);
        assert_eq!(found.label, "");
        assert_eq!(found.confidence, 0.0);
    }
}
