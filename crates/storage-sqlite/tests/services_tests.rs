//! End-to-end: core services driving the SQLite repositories.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{seed_entry, seed_project_with_filled, setup, EntryFixture};
use dealfolio_core::excluded::{ExcludedPositionsService, ExcludedPositionsServiceTrait, ExcludedScope};
use dealfolio_core::projects::{ProjectQuery, ProjectService, ProjectServiceTrait};
use dealfolio_storage_sqlite::ledger::LedgerRepository;
use dealfolio_storage_sqlite::projects::ProjectRepository;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_project_page_over_sqlite() {
    let db = setup();
    for (id, filled) in [("full", 6), ("five", 5), ("two", 2), ("zero", 0)] {
        seed_project_with_filled(&db, id, filled);
    }
    seed_entry(
        &db,
        EntryFixture {
            id: "e1",
            project_id: "full",
            delta_cost: "250000",
            ..Default::default()
        },
    );

    let service = ProjectService::new(Arc::new(ProjectRepository::new(Arc::clone(&db.pool))));
    let page = service
        .project_page(ProjectQuery {
            page_size: 3,
            ..Default::default()
        })
        .await;

    assert_eq!(page.total_count, 4);
    assert_eq!(page.total_pages, 2);
    // Default sort: completeness ascending
    assert_eq!(page.rows[0].id, "zero");
    assert_eq!(page.rows[0].completeness, 0);

    let stats = service.completeness_stats(None).await;
    assert_eq!(stats.avg_completeness, 54);
    assert_eq!(stats.fully_enriched, 1);
    assert_eq!(stats.needs_attention, 2);

    let full_row = service
        .project_page(ProjectQuery {
            search: Some("full".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(full_row.rows[0].cost, dec!(250000));
    assert_eq!(full_row.rows[0].completeness, 100);
}

#[tokio::test]
async fn test_reconcile_over_sqlite() {
    let db = setup();
    seed_entry(
        &db,
        EntryFixture {
            id: "c1",
            project_id: "USDT",
            delta_cost: "800",
            outcome_type: Some("Cash"),
            unrealized_mv: "800",
            total_mv: "800",
            ..Default::default()
        },
    );
    seed_entry(
        &db,
        EntryFixture {
            id: "f1",
            project_id: "Flows",
            delta_cost: "-300",
            realized_mv: "-300",
            total_mv: "-300",
            ..Default::default()
        },
    );
    seed_entry(
        &db,
        EntryFixture {
            id: "n1",
            project_id: "aave",
            delta_cost: "450",
            ..Default::default()
        },
    );

    let service =
        ExcludedPositionsService::new(Arc::new(LedgerRepository::new(Arc::clone(&db.pool))));
    let scope = ExcludedScope::new("fund-i", NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

    let reconciliation = service.reconcile(scope.clone()).await;
    assert!(reconciliation.balanced);
    assert_eq!(reconciliation.grand_totals.project_count, 2);
    assert_eq!(reconciliation.grand_totals.cost, dec!(500));

    let categories = service.excluded_categories(scope).await;
    assert_eq!(categories.len(), 4);
}
