//! Excluded-position domain models.
//!
//! Ledger rows that are not standard investment positions (cash, capital
//! flows, NAV adjustments, other assets) are reported separately from the
//! portfolio, grouped into a fixed category set. Category aggregates and the
//! unpartitioned grand totals are sums over the same non-overlapping
//! partition of the same row set, which is what makes them reconcile.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CASH_OUTCOME_TYPE, FLOWS_PROJECT_ID, NAV_ADJUSTMENTS_PROJECT_ID, OTHER_ASSETS_PROJECT_ID,
};

/// The fixed set of excluded-position categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExcludedCategory {
    Flows,
    NavAdjustments,
    OtherAssets,
    Cash,
}

impl ExcludedCategory {
    /// All categories, in reporting order.
    pub const ALL: [ExcludedCategory; 4] = [
        ExcludedCategory::Flows,
        ExcludedCategory::NavAdjustments,
        ExcludedCategory::OtherAssets,
        ExcludedCategory::Cash,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExcludedCategory::Flows => "Flows",
            ExcludedCategory::NavAdjustments => "NAV Adjustments",
            ExcludedCategory::OtherAssets => "Other Assets",
            ExcludedCategory::Cash => "Cash",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Flows" => Some(ExcludedCategory::Flows),
            "NAV Adjustments" => Some(ExcludedCategory::NavAdjustments),
            "Other Assets" => Some(ExcludedCategory::OtherAssets),
            "Cash" => Some(ExcludedCategory::Cash),
            _ => None,
        }
    }

    /// The partition predicate for excluded ledger rows, evaluated in fixed
    /// order: the cash outcome tag wins over any sentinel project id, so a
    /// row lands in at most one category. The storage layer's CASE
    /// expression encodes the same order.
    ///
    /// Returns `None` for standard investment rows.
    pub fn classify(project_id: &str, outcome_type: Option<&str>) -> Option<Self> {
        if outcome_type.unwrap_or("") == CASH_OUTCOME_TYPE {
            return Some(ExcludedCategory::Cash);
        }
        match project_id {
            FLOWS_PROJECT_ID => Some(ExcludedCategory::Flows),
            NAV_ADJUSTMENTS_PROJECT_ID => Some(ExcludedCategory::NavAdjustments),
            OTHER_ASSETS_PROJECT_ID => Some(ExcludedCategory::OtherAssets),
            _ => None,
        }
    }
}

/// Scope for excluded-position queries: one vehicle, one portfolio snapshot
/// date, optionally narrowed to a reported-date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedScope {
    pub vehicle_id: String,
    pub portfolio_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_to: Option<NaiveDate>,
}

impl ExcludedScope {
    pub fn new(vehicle_id: impl Into<String>, portfolio_date: NaiveDate) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            portfolio_date,
            reported_from: None,
            reported_to: None,
        }
    }
}

/// Aggregates for one excluded-position category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: ExcludedCategory,
    /// Number of ledger rows in the category.
    pub project_count: i64,
    pub cost: Decimal,
    pub unrealized_mv: Decimal,
    pub realized_mv: Decimal,
    pub total_mv: Decimal,
}

impl CategoryTotals {
    pub fn zeroed(category: ExcludedCategory) -> Self {
        Self {
            category,
            project_count: 0,
            cost: Decimal::ZERO,
            unrealized_mv: Decimal::ZERO,
            realized_mv: Decimal::ZERO,
            total_mv: Decimal::ZERO,
        }
    }
}

/// The unpartitioned totals over the same excluded row set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotals {
    pub project_count: i64,
    pub cost: Decimal,
    pub unrealized_mv: Decimal,
    pub realized_mv: Decimal,
    pub total_mv: Decimal,
}

/// One drill-down line item composing a category aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedPositionDetail {
    pub project_id: String,
    pub cost: Decimal,
    pub unrealized_mv: Decimal,
    pub total_mv: Decimal,
}

/// Both sides of the reconciliation invariant for one scope, plus the
/// verdict: category sums must equal the independent grand totals for every
/// numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub categories: Vec<CategoryTotals>,
    pub grand_totals: GrandTotals,
    pub balanced: bool,
}

impl Reconciliation {
    /// Sums the category aggregates and compares them field by field with
    /// the grand totals.
    pub fn check(categories: Vec<CategoryTotals>, grand_totals: GrandTotals) -> Self {
        let mut summed = GrandTotals::default();
        for totals in &categories {
            summed.project_count += totals.project_count;
            summed.cost += totals.cost;
            summed.unrealized_mv += totals.unrealized_mv;
            summed.realized_mv += totals.realized_mv;
            summed.total_mv += totals.total_mv;
        }
        let balanced = summed == grand_totals;
        Self {
            categories,
            grand_totals,
            balanced,
        }
    }
}
