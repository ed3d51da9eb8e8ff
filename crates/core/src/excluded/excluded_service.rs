use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;

use super::excluded_model::{
    CategoryTotals, ExcludedCategory, ExcludedPositionDetail, ExcludedScope, GrandTotals,
    Reconciliation,
};
use crate::ledger::LedgerRepositoryTrait;

/// Trait defining the contract for the excluded-positions report.
///
/// Operations degrade to empty/zeroed results on data-access failure.
/// Drill-down is fetched on demand; nothing is cached between calls.
#[async_trait]
pub trait ExcludedPositionsServiceTrait: Send + Sync {
    /// Category aggregates for one vehicle and portfolio date. Always
    /// returns the full fixed category set, zero-filled where empty.
    async fn excluded_categories(&self, scope: ExcludedScope) -> Vec<CategoryTotals>;

    /// Line items composing one category's aggregate.
    async fn category_detail(
        &self,
        scope: ExcludedScope,
        category: ExcludedCategory,
    ) -> Vec<ExcludedPositionDetail>;

    /// Computes the category aggregates and the independent grand totals
    /// for the same scope and reports whether they balance.
    async fn reconcile(&self, scope: ExcludedScope) -> Reconciliation;
}

/// Service for the excluded-positions report.
pub struct ExcludedPositionsService {
    repository: Arc<dyn LedgerRepositoryTrait>,
}

impl ExcludedPositionsService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn zeroed_categories() -> Vec<CategoryTotals> {
        ExcludedCategory::ALL
            .iter()
            .map(|category| CategoryTotals::zeroed(*category))
            .collect()
    }
}

#[async_trait]
impl ExcludedPositionsServiceTrait for ExcludedPositionsService {
    async fn excluded_categories(&self, scope: ExcludedScope) -> Vec<CategoryTotals> {
        debug!(
            "Excluded categories for vehicle {} as of {}",
            scope.vehicle_id, scope.portfolio_date
        );
        match self.repository.excluded_category_totals(&scope) {
            Ok(categories) => categories,
            Err(e) => {
                error!("Excluded category query failed, returning zeroed set: {}", e);
                Self::zeroed_categories()
            }
        }
    }

    async fn category_detail(
        &self,
        scope: ExcludedScope,
        category: ExcludedCategory,
    ) -> Vec<ExcludedPositionDetail> {
        debug!(
            "Excluded detail for {} in vehicle {} as of {}",
            category.label(),
            scope.vehicle_id,
            scope.portfolio_date
        );
        match self.repository.excluded_category_detail(&scope, category) {
            Ok(rows) => rows,
            Err(e) => {
                error!("Excluded detail query failed, returning no rows: {}", e);
                Vec::new()
            }
        }
    }

    async fn reconcile(&self, scope: ExcludedScope) -> Reconciliation {
        let categories = match self.repository.excluded_category_totals(&scope) {
            Ok(categories) => categories,
            Err(e) => {
                error!("Excluded category query failed during reconcile: {}", e);
                Self::zeroed_categories()
            }
        };
        let grand_totals = match self.repository.excluded_grand_totals(&scope) {
            Ok(totals) => totals,
            Err(e) => {
                error!("Grand total query failed during reconcile: {}", e);
                GrandTotals::default()
            }
        };

        let reconciliation = Reconciliation::check(categories, grand_totals);
        if !reconciliation.balanced {
            warn!(
                "Excluded positions do not reconcile for vehicle {} as of {}",
                scope.vehicle_id, scope.portfolio_date
            );
        }
        reconciliation
    }
}
