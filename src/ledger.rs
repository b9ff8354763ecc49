//! Activity ledger
//!
//! Append-only store of committed rows. Corrections are new rows; nothing
//! already appended is edited or removed.

use serde::{Deserialize, Serialize};

use crate::reconciliation::efficiency;
use crate::types::{LedgerRow, TimeClass};

/// Aggregate hours across the ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LedgerTotals {
    pub tp_hours: f64,
    pub tnpi_hours: f64,
    pub tnp_hours: f64,
    pub standard_hours: f64,
    pub real_hours: f64,
    /// Standard over real for the whole ledger
    pub efficiency_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityLedger {
    rows: Vec<LedgerRow>,
}

impl ActivityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rows of one commit, in order.
    pub fn append(&mut self, rows: impl IntoIterator<Item = LedgerRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for_activity<'a>(
        &'a self,
        activity_id: &'a str,
    ) -> impl Iterator<Item = &'a LedgerRow> + 'a {
        self.rows.iter().filter(move |r| r.activity_id == activity_id)
    }

    pub fn totals(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for row in &self.rows {
            match row.class {
                TimeClass::Tp => totals.tp_hours += row.real_hours,
                TimeClass::Tnpi => totals.tnpi_hours += row.real_hours,
                TimeClass::Tnp => totals.tnp_hours += row.real_hours,
            }
            totals.standard_hours += row.standard_hours;
            totals.real_hours += row.real_hours;
        }
        totals.efficiency_percent = efficiency(totals.standard_hours, totals.real_hours);
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CaptureFlow;

    fn row(id: &str, class: TimeClass, standard: f64, real: f64) -> LedgerRow {
        LedgerRow {
            activity_id: id.to_string(),
            activity: "Drill".to_string(),
            flow: CaptureFlow::General,
            class,
            category: None,
            detail: None,
            standard_hours: standard,
            real_hours: real,
            comment: String::new(),
            interval: None,
        }
    }

    #[test]
    fn test_totals_by_class() {
        let mut ledger = ActivityLedger::new();
        ledger.append(vec![
            row("A", TimeClass::Tp, 5.0, 5.0),
            row("A", TimeClass::Tnpi, 0.0, 2.0),
            row("B", TimeClass::Tnp, 0.0, 1.0),
        ]);
        let totals = ledger.totals();
        assert_eq!(totals.tp_hours, 5.0);
        assert_eq!(totals.tnpi_hours, 2.0);
        assert_eq!(totals.tnp_hours, 1.0);
        assert_eq!(totals.real_hours, 8.0);
        assert!((totals.efficiency_percent - 62.5).abs() < 1e-9);
        assert_eq!(ledger.rows_for_activity("A").count(), 2);
    }

    #[test]
    fn test_empty_ledger_totals() {
        let totals = ActivityLedger::new().totals();
        assert_eq!(totals, LedgerTotals::default());
    }
}
