//! Excluded positions module - categorization of non-investment ledger rows
//! and the reconciliation check over their aggregates.

mod excluded_model;
mod excluded_service;


// Re-export the public interface
pub use excluded_model::{
    CategoryTotals, ExcludedCategory, ExcludedPositionDetail, ExcludedScope, GrandTotals,
    Reconciliation,
};
pub use excluded_service::{ExcludedPositionsService, ExcludedPositionsServiceTrait};
