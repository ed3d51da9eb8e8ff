//! Row types for the raw ledger reporting queries.
//!
//! Monetary columns come back as TEXT and pass through the numeric
//! normalizer on their way into the domain types.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use dealfolio_core::excluded::{ExcludedPositionDetail, GrandTotals};
use dealfolio_core::ledger::AttributedCost;
use dealfolio_core::utils::numeric::normalize_decimal;

#[derive(QueryableByName, Debug)]
pub struct AttributedCostRowDB {
    #[diesel(sql_type = Text)]
    pub project_id: String,
    #[diesel(sql_type = Text)]
    pub cost: String,
}

impl From<AttributedCostRowDB> for AttributedCost {
    fn from(row: AttributedCostRowDB) -> Self {
        AttributedCost {
            project_id: row.project_id,
            cost: normalize_decimal(Some(&row.cost)),
        }
    }
}

/// One grouped row of the excluded-category aggregate; the category label
/// is produced by the partition CASE expression.
#[derive(QueryableByName, Debug)]
pub struct CategoryTotalsRowDB {
    #[diesel(sql_type = Text)]
    pub category: String,
    #[diesel(sql_type = BigInt)]
    pub project_count: i64,
    #[diesel(sql_type = Text)]
    pub cost: String,
    #[diesel(sql_type = Text)]
    pub unrealized_mv: String,
    #[diesel(sql_type = Text)]
    pub realized_mv: String,
    #[diesel(sql_type = Text)]
    pub total_mv: String,
}

#[derive(QueryableByName, Debug)]
pub struct GrandTotalsRowDB {
    #[diesel(sql_type = BigInt)]
    pub project_count: i64,
    #[diesel(sql_type = Text)]
    pub cost: String,
    #[diesel(sql_type = Text)]
    pub unrealized_mv: String,
    #[diesel(sql_type = Text)]
    pub realized_mv: String,
    #[diesel(sql_type = Text)]
    pub total_mv: String,
}

impl From<GrandTotalsRowDB> for GrandTotals {
    fn from(row: GrandTotalsRowDB) -> Self {
        GrandTotals {
            project_count: row.project_count,
            cost: normalize_decimal(Some(&row.cost)),
            unrealized_mv: normalize_decimal(Some(&row.unrealized_mv)),
            realized_mv: normalize_decimal(Some(&row.realized_mv)),
            total_mv: normalize_decimal(Some(&row.total_mv)),
        }
    }
}

#[derive(QueryableByName, Debug)]
pub struct ExcludedDetailRowDB {
    #[diesel(sql_type = Text)]
    pub project_id: String,
    #[diesel(sql_type = Text)]
    pub cost: String,
    #[diesel(sql_type = Text)]
    pub unrealized_mv: String,
    #[diesel(sql_type = Text)]
    pub total_mv: String,
}

impl From<ExcludedDetailRowDB> for ExcludedPositionDetail {
    fn from(row: ExcludedDetailRowDB) -> Self {
        ExcludedPositionDetail {
            project_id: row.project_id,
            cost: normalize_decimal(Some(&row.cost)),
            unrealized_mv: normalize_decimal(Some(&row.unrealized_mv)),
            total_mv: normalize_decimal(Some(&row.total_mv)),
        }
    }
}
