//! Cause catalogs for the TNPI and TNP domains.
//!
//! The reconciliation engine never consults a catalog; callers use it to
//! populate pickers and to pre-check causes before submitting a capture.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::CauseDomain;

/// Read-only source of valid (category, detail) pairs per domain.
pub trait CauseCatalog {
    fn list_categories(&self, domain: CauseDomain) -> Vec<String>;

    fn list_details(&self, domain: CauseDomain, category: &str) -> Vec<String>;

    /// Whether the pair is offered for `domain`.
    fn contains(&self, domain: CauseDomain, category: &str, detail: &str) -> bool {
        self.list_details(domain, category).iter().any(|d| d == detail)
    }
}

/// What the TNP domain offers when no TNP catalog has been loaded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TnpFallback {
    /// Empty TNP domain
    #[default]
    None,
    /// Offer the TNPI categories and details under TNP
    Tnpi,
}

/// Category → details map.
pub type CauseTree = BTreeMap<String, Vec<String>>;

/// Catalog held in memory, as supplied by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub tnpi: CauseTree,
    #[serde(default)]
    pub tnp: Option<CauseTree>,
    #[serde(default)]
    pub tnp_fallback: TnpFallback,
}

impl InMemoryCatalog {
    pub fn new(tnpi: CauseTree, tnp: Option<CauseTree>, tnp_fallback: TnpFallback) -> Self {
        Self {
            tnpi,
            tnp,
            tnp_fallback,
        }
    }

    /// Parse a catalog document. A `tnp_fallback` key in the document wins;
    /// `default_fallback` applies only when the document leaves it out.
    pub fn from_json(raw: &str, default_fallback: TnpFallback) -> serde_json::Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Ok(Self::new(
            file.tnpi,
            file.tnp,
            file.tnp_fallback.unwrap_or(default_fallback),
        ))
    }

    /// The tree actually served for `domain`, after applying the fallback policy.
    fn tree(&self, domain: CauseDomain) -> Option<&CauseTree> {
        match domain {
            CauseDomain::Tnpi => Some(&self.tnpi),
            CauseDomain::Tnp => match (&self.tnp, self.tnp_fallback) {
                (Some(tnp), _) if !tnp.is_empty() => Some(tnp),
                (_, TnpFallback::Tnpi) => Some(&self.tnpi),
                (_, TnpFallback::None) => None,
            },
        }
    }

    /// Whether TNP causes are currently being served from the TNPI tree.
    pub fn tnp_uses_fallback(&self) -> bool {
        self.tnp.as_ref().map_or(true, BTreeMap::is_empty)
            && self.tnp_fallback == TnpFallback::Tnpi
    }
}

/// Catalog document as read from disk, fallback policy optional.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tnpi: CauseTree,
    #[serde(default)]
    tnp: Option<CauseTree>,
    #[serde(default)]
    tnp_fallback: Option<TnpFallback>,
}

impl CauseCatalog for InMemoryCatalog {
    fn list_categories(&self, domain: CauseDomain) -> Vec<String> {
        self.tree(domain)
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn list_details(&self, domain: CauseDomain, category: &str) -> Vec<String> {
        self.tree(domain)
            .and_then(|t| t.get(category))
            .cloned()
            .unwrap_or_default()
    }
}
