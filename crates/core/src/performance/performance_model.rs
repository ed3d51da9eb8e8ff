//! Performance multiples: MOIC and its presentation buckets.
//!
//! MOIC is an `f64` rather than a `Decimal` because a position that returned
//! value on zero recorded cost has a legitimately infinite multiple, and the
//! classifier must also absorb NaN from upstream without faulting.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded multiple of exactly -1 marks a loan position (cost was booked
/// negative); display formatting renders it distinctly from a real multiple.
pub const LOAN_MOIC_SENTINEL: f64 = -1.0;

/// Multiple on invested capital for one position.
///
/// `total_mv / cost` when cost is positive; positive value on non-positive
/// cost is an infinite multiple; no value (or no cost and no value) is zero.
pub fn compute_moic(total_mv: Decimal, cost: Decimal) -> f64 {
    if cost > Decimal::ZERO {
        (total_mv / cost).to_f64().unwrap_or(0.0)
    } else if total_mv > Decimal::ZERO {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Presentation bucket for a MOIC value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBucket {
    Unknown,
    GrandSlam,
    HomeRun,
    Doubles,
    BaseHit,
    Cost,
    WriteOff,
    Loss,
}

impl PerformanceBucket {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceBucket::Unknown => "unknown",
            PerformanceBucket::GrandSlam => "grand_slam",
            PerformanceBucket::HomeRun => "home_run",
            PerformanceBucket::Doubles => "doubles",
            PerformanceBucket::BaseHit => "base_hit",
            PerformanceBucket::Cost => "cost",
            PerformanceBucket::WriteOff => "write_off",
            PerformanceBucket::Loss => "loss",
        }
    }
}

/// Classifies a MOIC value into its presentation bucket.
///
/// Checks run in a fixed order. Only NaN maps to `Unknown`; an infinite
/// multiple satisfies `>= 10` and classifies as `GrandSlam`. Values below
/// zero fall through to `Loss` with the rest of the sub-1 range.
pub fn classify_moic(moic: f64) -> PerformanceBucket {
    if moic.is_nan() {
        PerformanceBucket::Unknown
    } else if moic >= 10.0 {
        PerformanceBucket::GrandSlam
    } else if moic >= 5.0 {
        PerformanceBucket::HomeRun
    } else if moic >= 2.0 {
        PerformanceBucket::Doubles
    } else if moic > 1.0 {
        PerformanceBucket::BaseHit
    } else if moic == 1.0 {
        PerformanceBucket::Cost
    } else if moic == 0.0 {
        PerformanceBucket::WriteOff
    } else {
        PerformanceBucket::Loss
    }
}

/// Classifies an optional MOIC; a missing value is `Unknown`.
pub fn classify_moic_opt(moic: Option<f64>) -> PerformanceBucket {
    match moic {
        Some(value) => classify_moic(value),
        None => PerformanceBucket::Unknown,
    }
}

/// Formats a MOIC for display. The loan sentinel renders as "Loan", an
/// unknown multiple as an em dash, an infinite one as the infinity sign.
pub fn format_moic(moic: f64) -> String {
    if moic == LOAN_MOIC_SENTINEL {
        "Loan".to_string()
    } else if moic.is_nan() {
        "—".to_string()
    } else if moic.is_infinite() {
        "∞".to_string()
    } else {
        format!("{:.2}x", moic)
    }
}
