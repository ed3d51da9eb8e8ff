//! Numeric normalization for loosely typed store values.
//!
//! The relational store hands back monetary values as nullable text (and,
//! through JSON sub-documents, as arbitrary JSON values). Everything numeric
//! passes through this module exactly once on its way in, so downstream
//! arithmetic can assume finite `Decimal` values and never sees a null,
//! NaN, or parse error.

use log::warn;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Coerces an optional textual value into a `Decimal`.
///
/// `None`, empty/whitespace, and unparseable inputs all normalize to zero.
/// Plain and scientific notation are both accepted. Never panics, never
/// returns an error.
pub fn normalize_decimal(raw: Option<&str>) -> Decimal {
    let Some(value) = raw else {
        return Decimal::ZERO;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(trimmed) {
        Ok(d) => d,
        Err(_) => match Decimal::from_scientific(trimmed) {
            Ok(d) => d,
            Err(e) => {
                warn!("Unparseable numeric value '{}', treating as zero: {}", trimmed, e);
                Decimal::ZERO
            }
        },
    }
}

/// Coerces a JSON value into a `Decimal` with the same zero-fallback policy
/// as [`normalize_decimal`].
///
/// Numbers and numeric strings convert; null, booleans, arrays, and objects
/// normalize to zero. Non-finite doubles (NaN) cannot be represented by
/// `serde_json::Number` and so cannot reach the conversion.
pub fn normalize_json_number(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(s) => normalize_decimal(Some(s)),
        _ => Decimal::ZERO,
    }
}
