//! Performance module - MOIC computation and bucket classification.

mod performance_model;


// Re-export the public interface
pub use performance_model::{
    classify_moic, classify_moic_opt, compute_moic, format_moic, PerformanceBucket,
    LOAN_MOIC_SENTINEL,
};
