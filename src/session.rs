//! Caller-owned capture context
//!
//! Holds what the surrounding application keeps between commits: the cause
//! catalog and the ledger. The engine is handed a request, and only a
//! successful reconciliation touches the ledger.

use tracing::info;

use crate::catalog::{CauseCatalog, InMemoryCatalog};
use crate::ledger::ActivityLedger;
use crate::orchestrator::{Reconciliation, ReconciliationEngine};
use crate::reconciliation::ReconcileError;
use crate::types::{CaptureRequest, CauseDomain};

/// A cause row whose (category, detail) the catalog does not offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCause {
    pub domain: CauseDomain,
    pub category: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct CaptureContext {
    pub catalog: InMemoryCatalog,
    pub ledger: ActivityLedger,
}

impl CaptureContext {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self {
            catalog,
            ledger: ActivityLedger::new(),
        }
    }

    /// Reconcile and commit. On rejection the ledger is left untouched.
    pub fn submit(
        &mut self,
        engine: &ReconciliationEngine,
        request: &CaptureRequest,
    ) -> Result<Reconciliation, ReconcileError> {
        let reconciliation = engine.reconcile(request)?;
        self.ledger.append(reconciliation.rows.iter().cloned());
        info!(
            activity_id = %reconciliation.activity_id,
            rows = reconciliation.rows.len(),
            "Committed to ledger"
        );
        Ok(reconciliation)
    }

    /// Cause rows in `reconciliation` missing from the catalog.
    pub fn unknown_causes(&self, reconciliation: &Reconciliation) -> Vec<UnknownCause> {
        let Some(domain) = reconciliation.classification.excess_class else {
            return Vec::new();
        };
        reconciliation
            .classification
            .breakdown
            .iter()
            .filter(|c| !self.catalog.contains(domain, &c.category, &c.detail))
            .map(|c| UnknownCause {
                domain,
                category: c.category.clone(),
                detail: c.detail.clone(),
            })
            .collect()
    }
}
