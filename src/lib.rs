//! rigbook: drilling time reconciliation
//!
//! Turns a captured real duration and a standard duration into a
//! cause-attributed split of productive (TP), improductive (TNPI) and
//! planned non-productive (TNP) time that always sums back to the captured
//! total.
//!
//! ## Layout
//!
//! - **Reconciliation**: efficiency, excess classification, cause allocation,
//!   interval distribution
//! - **Standards**: connection, trip and BHA standard lookups and trip math
//! - **Orchestrator**: one call per capture flow, producing ledger rows
//! - **Session**: caller-owned catalog and ledger

pub mod catalog;
pub mod config;
pub mod ledger;
pub mod orchestrator;
pub mod reconciliation;
pub mod session;
pub mod standards;
pub mod types;

pub use catalog::{CauseCatalog, InMemoryCatalog, TnpFallback};
pub use config::{ConfigError, EngineConfig};
pub use ledger::{ActivityLedger, LedgerTotals};
pub use orchestrator::{EngineSettings, FlowDetail, Reconciliation, ReconciliationEngine};
pub use reconciliation::{efficiency, EfficiencySeverity, ReconcileError, SeverityThresholds};
pub use session::{CaptureContext, UnknownCause};
pub use standards::StandardsTables;

pub use types::{
    Capture, CaptureFlow, CaptureRequest, CauseBreakdownEntry, CauseRef, CauseSelection,
    DataQualityWarning, ExcessClass, LedgerRow, TimeClass, TimeClassification,
};
