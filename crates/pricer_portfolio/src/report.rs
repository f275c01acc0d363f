//! Valuation report rows.

use std::fmt;

use pricer_core::types::Date;
use serde::{Deserialize, Serialize};

/// One priced instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Display name of the instrument type
    pub instrument_type: String,
    /// Net present value in currency units
    pub npv: f64,
}

/// Priced portfolio, rows in instrument order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Valuation date of the curve
    pub valuation_date: Date,
    /// One row per instrument
    pub rows: Vec<ReportRow>,
}

impl PortfolioReport {
    /// NPV of the first row with the given type.
    pub fn npv_of(&self, instrument_type: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.instrument_type == instrument_type)
            .map(|r| r.npv)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing was priced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Valuation date: {}", self.valuation_date)?;
        writeln!(f, "{:<20} {:>18}", "Type", "NPV")?;
        for row in &self.rows {
            writeln!(f, "{:<20} {:>18.2}", row.instrument_type, row.npv)?;
        }
        Ok(())
    }
}
