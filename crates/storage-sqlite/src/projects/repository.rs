use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::Sqlite;
use std::sync::Arc;

use dealfolio_core::constants::{ENRICHMENT_FIELD_COUNT, NEEDS_ATTENTION_THRESHOLD};
use dealfolio_core::projects::{
    CorpusStats, EnrichmentField, ProjectQuery, ProjectRepositoryTrait, ProjectSearchResult,
    ProjectSortBy, SortDirection,
};
use dealfolio_core::Result;

use super::model::{CorpusStatsRowDB, ProjectPageRowDB};
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;

/// SQL expression counting a project's filled enrichment fields. Must stay
/// in lockstep with `Project::filled_count`: non-null and non-empty after
/// trimming.
const FILLED_COUNT_SQL: &str = "(CASE WHEN TRIM(COALESCE(p.coingecko_id, '')) <> '' THEN 1 ELSE 0 END \
    + CASE WHEN TRIM(COALESCE(p.project_stack, '')) <> '' THEN 1 ELSE 0 END \
    + CASE WHEN TRIM(COALESCE(p.project_tag, '')) <> '' THEN 1 ELSE 0 END \
    + CASE WHEN TRIM(COALESCE(p.project_sub_tag, '')) <> '' THEN 1 ELSE 0 END \
    + CASE WHEN TRIM(COALESCE(p.website, '')) <> '' THEN 1 ELSE 0 END \
    + CASE WHEN TRIM(COALESCE(p.description, '')) <> '' THEN 1 ELSE 0 END)";

/// Cost attribution over the ledger: cash rows and the placeholder project
/// never contribute.
const COSTS_CTE_GLOBAL: &str = "WITH costs AS ( \
    SELECT project_id, CAST(SUM(CAST(delta_cost AS DECIMAL)) AS TEXT) AS cost \
    FROM ledger_entries \
    WHERE COALESCE(outcome_type, '') <> 'Cash' AND project_id <> 'Other Assets' \
    GROUP BY project_id)";

const COSTS_CTE_VEHICLE: &str = "WITH costs AS ( \
    SELECT project_id, CAST(SUM(CAST(delta_cost AS DECIMAL)) AS TEXT) AS cost \
    FROM ledger_entries \
    WHERE COALESCE(outcome_type, '') <> 'Cash' AND project_id <> 'Other Assets' \
      AND vehicle_id = ? \
    GROUP BY project_id)";

/// Membership of a project in one vehicle's universe: at least one
/// attributable ledger row for that vehicle.
const VEHICLE_SCOPE_SQL: &str = " AND EXISTS (SELECT 1 FROM ledger_entries le \
    WHERE le.project_id = p.id AND le.vehicle_id = ? \
      AND COALESCE(le.outcome_type, '') <> 'Cash' AND le.project_id <> 'Other Assets')";

/// Repository for read-only project universe queries.
pub struct ProjectRepository {
    pool: Arc<DbPool>,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

/// The missing-field filter as a closed dispatch over the recognized
/// enumeration; caller input never reaches the SQL text.
fn missing_field_clause(field: EnrichmentField) -> &'static str {
    match field {
        EnrichmentField::CoingeckoId => " AND (p.coingecko_id IS NULL OR p.coingecko_id = '')",
        EnrichmentField::ProjectStack => " AND (p.project_stack IS NULL OR p.project_stack = '')",
        EnrichmentField::ProjectTag => " AND (p.project_tag IS NULL OR p.project_tag = '')",
        EnrichmentField::ProjectSubTag => {
            " AND (p.project_sub_tag IS NULL OR p.project_sub_tag = '')"
        }
        EnrichmentField::Website => " AND (p.website IS NULL OR p.website = '')",
        EnrichmentField::Description => " AND (p.description IS NULL OR p.description = '')",
    }
}

fn order_clause(sort_by: ProjectSortBy, sort_dir: SortDirection) -> String {
    // Cost and completeness sorts tie-break on the project id ascending
    // regardless of the direction on the primary key.
    match (sort_by, sort_dir) {
        (ProjectSortBy::Cost, SortDirection::Asc) => {
            " ORDER BY CAST(COALESCE(c.cost, '0') AS DECIMAL) ASC, p.id ASC".to_string()
        }
        (ProjectSortBy::Cost, SortDirection::Desc) => {
            " ORDER BY CAST(COALESCE(c.cost, '0') AS DECIMAL) DESC, p.id ASC".to_string()
        }
        (ProjectSortBy::ProjectId, SortDirection::Asc) => " ORDER BY p.id ASC".to_string(),
        (ProjectSortBy::ProjectId, SortDirection::Desc) => " ORDER BY p.id DESC".to_string(),
        (ProjectSortBy::Completeness, SortDirection::Asc) => {
            format!(" ORDER BY {} ASC, p.id ASC", FILLED_COUNT_SQL)
        }
        (ProjectSortBy::Completeness, SortDirection::Desc) => {
            format!(" ORDER BY {} DESC, p.id ASC", FILLED_COUNT_SQL)
        }
    }
}

/// Shared filter tail for the count and window queries. Returns the SQL
/// fragment and the bind values it expects, in order.
fn filter_clause(query: &ProjectQuery) -> (String, Vec<String>) {
    let mut sql = String::new();
    let mut binds = Vec::new();

    if let Some(vehicle_id) = query.vehicle_id.as_deref() {
        sql.push_str(VEHICLE_SCOPE_SQL);
        binds.push(vehicle_id.to_string());
    }
    if let Some(search) = query.search.as_deref() {
        sql.push_str(" AND p.id LIKE ?");
        binds.push(format!("%{}%", search));
    }
    if let Some(field) = query.missing_field {
        sql.push_str(missing_field_clause(field));
    }

    (sql, binds)
}

impl ProjectRepositoryTrait for ProjectRepository {
    fn corpus_stats(&self, vehicle_id: Option<&str>) -> Result<CorpusStats> {
        let mut conn = get_connection(&self.pool)?;

        let mut sql = format!(
            "SELECT COUNT(*) AS total_projects, \
             COALESCE(AVG({filled} * 100.0 / {field_count}.0), 0.0) AS avg_completeness, \
             COALESCE(SUM(CASE WHEN {filled} = {field_count} THEN 1 ELSE 0 END), 0) AS fully_enriched, \
             COALESCE(SUM(CASE WHEN {filled} < {attention} THEN 1 ELSE 0 END), 0) AS needs_attention, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.coingecko_id, '')) <> '' THEN 1 ELSE 0 END), 0) AS coingecko_id_filled, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.project_stack, '')) <> '' THEN 1 ELSE 0 END), 0) AS project_stack_filled, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.project_tag, '')) <> '' THEN 1 ELSE 0 END), 0) AS project_tag_filled, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.project_sub_tag, '')) <> '' THEN 1 ELSE 0 END), 0) AS project_sub_tag_filled, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.website, '')) <> '' THEN 1 ELSE 0 END), 0) AS website_filled, \
             COALESCE(SUM(CASE WHEN TRIM(COALESCE(p.description, '')) <> '' THEN 1 ELSE 0 END), 0) AS description_filled \
             FROM projects p WHERE 1=1",
            filled = FILLED_COUNT_SQL,
            field_count = ENRICHMENT_FIELD_COUNT,
            attention = NEEDS_ATTENTION_THRESHOLD,
        );
        if vehicle_id.is_some() {
            sql.push_str(VEHICLE_SCOPE_SQL);
        }

        let mut query_builder = Box::new(sql_query(sql)).into_boxed::<Sqlite>();
        if let Some(vehicle_id) = vehicle_id {
            query_builder = query_builder.bind::<Text, _>(vehicle_id.to_string());
        }

        let row: CorpusStatsRowDB = query_builder.get_result(&mut conn).into_core()?;
        Ok(CorpusStats::from(row))
    }

    fn search_projects(&self, query: &ProjectQuery) -> Result<ProjectSearchResult> {
        let mut conn = get_connection(&self.pool)?;
        let (filter_sql, filter_binds) = filter_clause(query);

        // Count query. This and the window fetch below are two independent
        // reads, not one snapshot; rows written between them can shift the
        // window against the count.
        #[derive(QueryableByName)]
        struct CountRow {
            #[diesel(sql_type = BigInt)]
            total: i64,
        }

        let count_sql = format!("SELECT COUNT(*) AS total FROM projects p WHERE 1=1{filter_sql}");
        let mut count_query = Box::new(sql_query(count_sql)).into_boxed::<Sqlite>();
        for bind in &filter_binds {
            count_query = count_query.bind::<Text, _>(bind.clone());
        }
        let total_count = count_query
            .get_result::<CountRow>(&mut conn)
            .into_core()?
            .total;

        // Window fetch, joined with attributed cost. The cost CTE carries
        // the vehicle restriction when one is given, so scoped listings
        // never leak cost from other vehicles.
        let costs_cte = if query.vehicle_id.is_some() {
            COSTS_CTE_VEHICLE
        } else {
            COSTS_CTE_GLOBAL
        };
        let page_sql = format!(
            "{costs_cte} \
             SELECT p.id, p.coingecko_id, p.project_stack, p.project_tag, p.project_sub_tag, \
             p.website, p.description, p.logo_url, COALESCE(c.cost, '0') AS cost \
             FROM projects p \
             LEFT JOIN costs c ON c.project_id = p.id \
             WHERE 1=1{filter_sql}{order} LIMIT ? OFFSET ?",
            order = order_clause(query.sort_by, query.sort_dir),
        );

        let mut page_query = Box::new(sql_query(page_sql)).into_boxed::<Sqlite>();
        if let Some(vehicle_id) = query.vehicle_id.as_deref() {
            // First bind feeds the cost CTE; the filter binds repeat it for
            // the universe membership predicate.
            page_query = page_query.bind::<Text, _>(vehicle_id.to_string());
        }
        for bind in &filter_binds {
            page_query = page_query.bind::<Text, _>(bind.clone());
        }
        page_query = page_query
            .bind::<BigInt, _>(query.page_size)
            .bind::<BigInt, _>(query.offset());

        let rows_db: Vec<ProjectPageRowDB> = page_query.load(&mut conn).into_core()?;
        let rows = rows_db.into_iter().map(Into::into).collect();

        Ok(ProjectSearchResult { rows, total_count })
    }
}
