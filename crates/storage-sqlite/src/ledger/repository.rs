use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use log::warn;
use std::sync::Arc;

use dealfolio_core::excluded::{
    CategoryTotals, ExcludedCategory, ExcludedPositionDetail, ExcludedScope, GrandTotals,
};
use dealfolio_core::ledger::{AttributedCost, LedgerRepositoryTrait};
use dealfolio_core::utils::numeric::normalize_decimal;
use dealfolio_core::Result;

use super::model::{
    AttributedCostRowDB, CategoryTotalsRowDB, ExcludedDetailRowDB, GrandTotalsRowDB,
};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;

/// The excluded-row partition as a CASE expression, evaluated in the same
/// fixed order as `ExcludedCategory::classify`: the cash outcome tag wins
/// over any sentinel project id. Keeping the two in lockstep is what makes
/// category sums and grand totals reconcile by construction.
const CATEGORY_CASE_SQL: &str = "CASE \
    WHEN COALESCE(outcome_type, '') = 'Cash' THEN 'Cash' \
    WHEN project_id = 'Flows' THEN 'Flows' \
    WHEN project_id = 'NAV Adjustments' THEN 'NAV Adjustments' \
    WHEN project_id = 'Other Assets' THEN 'Other Assets' \
    END";

/// Membership predicate for the excluded row set; the exact union of the
/// CASE arms above.
const EXCLUDED_PREDICATE_SQL: &str = "(COALESCE(outcome_type, '') = 'Cash' \
    OR project_id IN ('Flows', 'NAV Adjustments', 'Other Assets'))";

/// Repository for read-only ledger queries.
pub struct LedgerRepository {
    pool: Arc<DbPool>,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

/// Scope filter shared by every excluded-position query. Returns the SQL
/// fragment and its bind values, in order.
fn scope_clause(scope: &ExcludedScope) -> (String, Vec<String>) {
    let mut sql = String::from(" WHERE vehicle_id = ? AND portfolio_date = ?");
    let mut binds = vec![
        scope.vehicle_id.clone(),
        scope.portfolio_date.to_string(),
    ];

    if let Some(from) = scope.reported_from {
        sql.push_str(" AND reported_date >= ?");
        binds.push(from.to_string());
    }
    if let Some(to) = scope.reported_to {
        sql.push_str(" AND reported_date <= ?");
        binds.push(to.to_string());
    }

    (sql, binds)
}

/// The per-category detail predicate. The non-cash guard on the sentinel
/// categories mirrors the CASE order, so detail rows partition exactly like
/// the aggregate.
fn category_clause(category: ExcludedCategory) -> &'static str {
    match category {
        ExcludedCategory::Cash => " AND COALESCE(outcome_type, '') = 'Cash'",
        ExcludedCategory::Flows => {
            " AND project_id = 'Flows' AND COALESCE(outcome_type, '') <> 'Cash'"
        }
        ExcludedCategory::NavAdjustments => {
            " AND project_id = 'NAV Adjustments' AND COALESCE(outcome_type, '') <> 'Cash'"
        }
        ExcludedCategory::OtherAssets => {
            " AND project_id = 'Other Assets' AND COALESCE(outcome_type, '') <> 'Cash'"
        }
    }
}

impl LedgerRepositoryTrait for LedgerRepository {
    fn attributed_costs(&self, vehicle_id: Option<&str>) -> Result<Vec<AttributedCost>> {
        let mut conn = get_connection(&self.pool)?;

        let mut sql = String::from(
            "SELECT project_id, CAST(SUM(CAST(delta_cost AS DECIMAL)) AS TEXT) AS cost \
             FROM ledger_entries \
             WHERE COALESCE(outcome_type, '') <> 'Cash' AND project_id <> 'Other Assets'",
        );
        if vehicle_id.is_some() {
            sql.push_str(" AND vehicle_id = ?");
        }
        sql.push_str(" GROUP BY project_id ORDER BY project_id ASC");

        let mut query_builder = Box::new(sql_query(sql)).into_boxed::<Sqlite>();
        if let Some(vehicle_id) = vehicle_id {
            query_builder = query_builder.bind::<Text, _>(vehicle_id.to_string());
        }

        let rows: Vec<AttributedCostRowDB> = query_builder.load(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn excluded_category_totals(&self, scope: &ExcludedScope) -> Result<Vec<CategoryTotals>> {
        let mut conn = get_connection(&self.pool)?;
        let (scope_sql, scope_binds) = scope_clause(scope);

        let sql = format!(
            "SELECT {case} AS category, \
             COUNT(*) AS project_count, \
             CAST(SUM(CAST(delta_cost AS DECIMAL)) AS TEXT) AS cost, \
             CAST(SUM(CAST(unrealized_mv AS DECIMAL)) AS TEXT) AS unrealized_mv, \
             CAST(SUM(CAST(realized_mv AS DECIMAL)) AS TEXT) AS realized_mv, \
             CAST(SUM(CAST(total_mv AS DECIMAL)) AS TEXT) AS total_mv \
             FROM ledger_entries{scope_sql} AND {predicate} \
             GROUP BY category",
            case = CATEGORY_CASE_SQL,
            predicate = EXCLUDED_PREDICATE_SQL,
        );

        let mut query_builder = Box::new(sql_query(sql)).into_boxed::<Sqlite>();
        for bind in &scope_binds {
            query_builder = query_builder.bind::<Text, _>(bind.clone());
        }
        let rows: Vec<CategoryTotalsRowDB> = query_builder.load(&mut conn).into_core()?;

        // Zero-fill so the fixed category set is always complete.
        let mut totals: Vec<CategoryTotals> = ExcludedCategory::ALL
            .iter()
            .map(|category| CategoryTotals::zeroed(*category))
            .collect();
        for row in rows {
            let Some(category) = ExcludedCategory::from_label(&row.category) else {
                warn!("Skipping unrecognized excluded category '{}'", row.category);
                continue;
            };
            if let Some(entry) = totals.iter_mut().find(|t| t.category == category) {
                entry.project_count = row.project_count;
                entry.cost = normalize_decimal(Some(&row.cost));
                entry.unrealized_mv = normalize_decimal(Some(&row.unrealized_mv));
                entry.realized_mv = normalize_decimal(Some(&row.realized_mv));
                entry.total_mv = normalize_decimal(Some(&row.total_mv));
            }
        }
        Ok(totals)
    }

    fn excluded_grand_totals(&self, scope: &ExcludedScope) -> Result<GrandTotals> {
        let mut conn = get_connection(&self.pool)?;
        let (scope_sql, scope_binds) = scope_clause(scope);

        let sql = format!(
            "SELECT COUNT(*) AS project_count, \
             COALESCE(CAST(SUM(CAST(delta_cost AS DECIMAL)) AS TEXT), '0') AS cost, \
             COALESCE(CAST(SUM(CAST(unrealized_mv AS DECIMAL)) AS TEXT), '0') AS unrealized_mv, \
             COALESCE(CAST(SUM(CAST(realized_mv AS DECIMAL)) AS TEXT), '0') AS realized_mv, \
             COALESCE(CAST(SUM(CAST(total_mv AS DECIMAL)) AS TEXT), '0') AS total_mv \
             FROM ledger_entries{scope_sql} AND {predicate}",
            predicate = EXCLUDED_PREDICATE_SQL,
        );

        let mut query_builder = Box::new(sql_query(sql)).into_boxed::<Sqlite>();
        for bind in &scope_binds {
            query_builder = query_builder.bind::<Text, _>(bind.clone());
        }
        let row: GrandTotalsRowDB = query_builder.get_result(&mut conn).into_core()?;
        Ok(GrandTotals::from(row))
    }

    fn excluded_category_detail(
        &self,
        scope: &ExcludedScope,
        category: ExcludedCategory,
    ) -> Result<Vec<ExcludedPositionDetail>> {
        let mut conn = get_connection(&self.pool)?;
        let (scope_sql, scope_binds) = scope_clause(scope);

        let sql = format!(
            "SELECT project_id, delta_cost AS cost, unrealized_mv, total_mv \
             FROM ledger_entries{scope_sql}{category_sql} \
             ORDER BY project_id ASC, CAST(delta_cost AS DECIMAL) ASC, id ASC",
            category_sql = category_clause(category),
        );

        let mut query_builder = Box::new(sql_query(sql)).into_boxed::<Sqlite>();
        for bind in &scope_binds {
            query_builder = query_builder.bind::<Text, _>(bind.clone());
        }
        let rows: Vec<ExcludedDetailRowDB> = query_builder.load(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
