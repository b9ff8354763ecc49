//! Shared data structures for drilling time reconciliation
//!
//! - Classification: TP / TNPI / TNP tags, cause rows, classified splits
//! - Capture: operator commits per flow (general, connection, BHA, trip)
//! - Standards: lookup keys and catalog values
//! - Interval / trip: time-log rows and hourly trip profiles
//! - Ledger: output rows and data-quality warnings

mod capture;
mod classification;
mod interval;
mod ledger;
mod standards;
mod trip;

pub use capture::*;
pub use classification::*;
pub use interval::*;
pub use ledger::*;
pub use standards::*;
pub use trip::*;
