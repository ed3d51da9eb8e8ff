//! Ledger repository trait.
//!
//! One trait covers both read paths over the ledger table: cost attribution
//! for the project listing, and the excluded-position aggregates that back
//! the reconciliation report.

use super::ledger_model::AttributedCost;
use crate::errors::Result;
use crate::excluded::{
    CategoryTotals, ExcludedCategory, ExcludedPositionDetail, ExcludedScope, GrandTotals,
};

/// Trait defining the contract for ledger read operations.
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Sums cost deltas per project, excluding cash rows and the
    /// non-investment placeholder project. `None` aggregates across all
    /// vehicles; `Some` restricts to one vehicle. Projects with no rows are
    /// simply absent; callers coalesce their cost to zero.
    fn attributed_costs(&self, vehicle_id: Option<&str>) -> Result<Vec<AttributedCost>>;

    /// Aggregates excluded ledger rows into the fixed category set for one
    /// vehicle and portfolio date. Every category of the set is present in
    /// the result, zeroed when it has no rows.
    fn excluded_category_totals(&self, scope: &ExcludedScope) -> Result<Vec<CategoryTotals>>;

    /// The independent reconciliation total: same predicate set as
    /// [`Self::excluded_category_totals`], unpartitioned.
    fn excluded_grand_totals(&self, scope: &ExcludedScope) -> Result<GrandTotals>;

    /// Line-item drill-down for one category, in deterministic order. The
    /// rows sum exactly to that category's aggregate.
    fn excluded_category_detail(
        &self,
        scope: &ExcludedScope,
        category: ExcludedCategory,
    ) -> Result<Vec<ExcludedPositionDetail>>;
}
