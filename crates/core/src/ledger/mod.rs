//! Ledger module - ownership/transaction records and cost attribution.

mod ledger_model;
mod ledger_traits;


// Re-export the public interface
pub use ledger_model::{AttributedCost, LedgerEntry};
pub use ledger_traits::LedgerRepositoryTrait;
