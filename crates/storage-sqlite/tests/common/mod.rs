#![allow(dead_code)]

use std::sync::Arc;

use diesel::prelude::*;
use tempfile::TempDir;

use dealfolio_storage_sqlite::db::{create_pool, get_connection, run_migrations, DbPool};
use dealfolio_storage_sqlite::schema::{ledger_entries, projects};

/// A migrated throwaway database; the temp dir lives as long as the pool.
pub struct TestDb {
    _dir: TempDir,
    pub pool: Arc<DbPool>,
}

pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("dealfolio-test.db");
    let pool = create_pool(db_path.to_str().expect("utf-8 path")).expect("failed to create pool");
    let mut conn = get_connection(&pool).expect("failed to get connection");
    run_migrations(&mut conn).expect("failed to run migrations");
    TestDb { _dir: dir, pool }
}

/// Seeds one project row. Pass `None` to leave an enrichment field null.
pub struct ProjectFixture<'a> {
    pub id: &'a str,
    pub coingecko_id: Option<&'a str>,
    pub project_stack: Option<&'a str>,
    pub project_tag: Option<&'a str>,
    pub project_sub_tag: Option<&'a str>,
    pub website: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl Default for ProjectFixture<'_> {
    fn default() -> Self {
        Self {
            id: "aave",
            coingecko_id: None,
            project_stack: None,
            project_tag: None,
            project_sub_tag: None,
            website: None,
            description: None,
        }
    }
}

pub fn seed_project(db: &TestDb, fixture: ProjectFixture<'_>) {
    let mut conn = get_connection(&db.pool).expect("failed to get connection");
    diesel::insert_into(projects::table)
        .values((
            projects::id.eq(fixture.id),
            projects::coingecko_id.eq(fixture.coingecko_id),
            projects::project_stack.eq(fixture.project_stack),
            projects::project_tag.eq(fixture.project_tag),
            projects::project_sub_tag.eq(fixture.project_sub_tag),
            projects::website.eq(fixture.website),
            projects::description.eq(fixture.description),
        ))
        .execute(&mut conn)
        .expect("failed to seed project");
}

/// Seeds a project with `filled` of its 6 enrichment fields populated, in
/// scoring order.
pub fn seed_project_with_filled(db: &TestDb, id: &str, filled: u32) {
    let value = |index: u32| (filled > index).then_some("value");
    seed_project(
        db,
        ProjectFixture {
            id,
            coingecko_id: value(0),
            project_stack: value(1),
            project_tag: value(2),
            project_sub_tag: value(3),
            website: value(4),
            description: value(5),
        },
    );
}

/// Seeds one ledger row; defaults describe a plain investment position.
pub struct EntryFixture<'a> {
    pub id: &'a str,
    pub project_id: &'a str,
    pub vehicle_id: &'a str,
    pub delta_cost: &'a str,
    pub outcome_type: Option<&'a str>,
    pub unrealized_mv: &'a str,
    pub realized_mv: &'a str,
    pub total_mv: &'a str,
    pub portfolio_date: &'a str,
    pub reported_date: &'a str,
}

impl Default for EntryFixture<'_> {
    fn default() -> Self {
        Self {
            id: "entry-0",
            project_id: "aave",
            vehicle_id: "fund-i",
            delta_cost: "0",
            outcome_type: None,
            unrealized_mv: "0",
            realized_mv: "0",
            total_mv: "0",
            portfolio_date: "2025-06-30",
            reported_date: "2025-06-30",
        }
    }
}

pub fn seed_entry(db: &TestDb, fixture: EntryFixture<'_>) {
    let mut conn = get_connection(&db.pool).expect("failed to get connection");
    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::id.eq(fixture.id),
            ledger_entries::project_id.eq(fixture.project_id),
            ledger_entries::vehicle_id.eq(fixture.vehicle_id),
            ledger_entries::delta_cost.eq(fixture.delta_cost),
            ledger_entries::outcome_type.eq(fixture.outcome_type),
            ledger_entries::unrealized_mv.eq(fixture.unrealized_mv),
            ledger_entries::realized_mv.eq(fixture.realized_mv),
            ledger_entries::total_mv.eq(fixture.total_mv),
            ledger_entries::portfolio_date.eq(fixture.portfolio_date),
            ledger_entries::reported_date.eq(fixture.reported_date),
        ))
        .execute(&mut conn)
        .expect("failed to seed ledger entry");
}
