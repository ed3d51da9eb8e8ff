mod model;
mod repository;

pub use model::{AttributedCostRowDB, CategoryTotalsRowDB, ExcludedDetailRowDB, GrandTotalsRowDB};
pub use repository::LedgerRepository;
