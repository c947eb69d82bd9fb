//! Static registry mapping type ids to specialized extractors.

use serde::{Deserialize, Serialize};

use super::generic::GenericExtractor;
use super::types::{
    PatentAppealDecisionExtractor, PatentAppealExtractor, TrademarkAppealDecisionExtractor,
    TrademarkAppealExtractor,
};
use super::DocumentExtractor;
use crate::models::{Category, ExtractionConfig, Sector};

/// Extractor variant selected for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Fallback for any type without a dedicated extractor.
    Generic,
    /// Trademark appeal against refusal (petition).
    TrademarkAppeal,
    /// Trademark appeal denied, refusal upheld (official document).
    TrademarkAppealDecision,
    /// Patent appeal against refusal (petition).
    PatentAppeal,
    /// Patent appeal denied, refusal upheld (official document).
    PatentAppealDecision,
}

impl ExtractorKind {
    /// Instantiate the extractor.
    pub fn build(&self, config: &ExtractionConfig) -> Box<dyn DocumentExtractor> {
        match self {
            ExtractorKind::Generic => Box::new(GenericExtractor::from_config(config)),
            ExtractorKind::TrademarkAppeal => Box::new(TrademarkAppealExtractor::from_config(config)),
            ExtractorKind::TrademarkAppealDecision => {
                Box::new(TrademarkAppealDecisionExtractor::from_config(config))
            }
            ExtractorKind::PatentAppeal => Box::new(PatentAppealExtractor::from_config(config)),
            ExtractorKind::PatentAppealDecision => {
                Box::new(PatentAppealDecisionExtractor::from_config(config))
            }
        }
    }
}

/// One registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub type_id: &'static str,
    pub kind: ExtractorKind,
    pub category: Category,
    pub sector: Sector,
    /// Name of the validation schema (see [`crate::schema::lookup`]).
    pub schema: &'static str,
}

/// Every type with a dedicated extractor.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        type_id: "recursoIndeferimentoPedidoRegistro",
        kind: ExtractorKind::TrademarkAppeal,
        category: Category::Petition,
        sector: Sector::Trademarks,
        schema: "recursoIndeferimentoPedidoRegistro",
    },
    RouteEntry {
        type_id: "recursoIndeferimentoNaoProvido",
        kind: ExtractorKind::TrademarkAppealDecision,
        category: Category::OfficialDocument,
        sector: Sector::Trademarks,
        schema: "recursoIndeferimentoNaoProvido",
    },
    RouteEntry {
        type_id: "recursoIndeferimentoPedidoPatente",
        kind: ExtractorKind::PatentAppeal,
        category: Category::Petition,
        sector: Sector::Patents,
        schema: "recursoIndeferimentoPedidoPatente",
    },
    RouteEntry {
        type_id: "recursoIndeferimentoNaoProvidoPatente",
        kind: ExtractorKind::PatentAppealDecision,
        category: Category::OfficialDocument,
        sector: Sector::Patents,
        schema: "recursoIndeferimentoNaoProvidoPatente",
    },
    // Legacy id of the same decision
    RouteEntry {
        type_id: "recursoIndeferimentoPedidoPatente_naoProvido",
        kind: ExtractorKind::PatentAppealDecision,
        category: Category::OfficialDocument,
        sector: Sector::Patents,
        schema: "recursoIndeferimentoNaoProvidoPatente",
    },
];

/// Registry entry for a type id.
pub fn route(type_id: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|entry| entry.type_id == type_id)
}

/// Extractor for a type id; `None` means the generic extractor applies.
pub fn resolve_extractor(type_id: &str) -> Option<ExtractorKind> {
    route(type_id).map(|entry| entry.kind)
}

pub fn is_registered(type_id: &str) -> bool {
    route(type_id).is_some()
}

/// All registered type ids, in registry order.
pub fn registered_types() -> Vec<&'static str> {
    ROUTES.iter().map(|entry| entry.type_id).collect()
}

/// Registered type ids of one category.
pub fn registered_types_for(category: Category) -> Vec<&'static str> {
    ROUTES
        .iter()
        .filter(|entry| entry.category == category)
        .map(|entry| entry.type_id)
        .collect()
}
