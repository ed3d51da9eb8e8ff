//! Ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{CASH_OUTCOME_TYPE, OTHER_ASSETS_PROJECT_ID};

/// One ownership/transaction record. An entry belongs to exactly one vehicle
/// and one project; aggregation never counts a row twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    /// Project identifier; reserved sentinel ids mark non-investment rows.
    pub project_id: String,
    pub vehicle_id: String,
    /// Signed cost delta for this entry.
    pub delta_cost: Decimal,
    /// Outcome tag; `"Cash"` is the reserved cash marker.
    pub outcome_type: Option<String>,
    pub unrealized_mv: Decimal,
    pub realized_mv: Decimal,
    pub total_mv: Decimal,
    /// The as-of snapshot date this row belongs to.
    pub portfolio_date: NaiveDate,
    pub reported_date: NaiveDate,
}

impl LedgerEntry {
    /// True when this row contributes to a project's attributed cost: not a
    /// cash row (outcome type, null-coalesced) and not the non-investment
    /// placeholder project.
    pub fn is_attributable(&self) -> bool {
        self.outcome_type.as_deref().unwrap_or("") != CASH_OUTCOME_TYPE
            && self.project_id != OTHER_ASSETS_PROJECT_ID
    }
}

/// Summed cost deltas for one project, over the requested vehicle scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributedCost {
    pub project_id: String,
    pub cost: Decimal,
}
