mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{seed_entry, setup, EntryFixture};
use dealfolio_core::excluded::{ExcludedCategory, ExcludedScope, Reconciliation};
use dealfolio_core::ledger::LedgerRepositoryTrait;
use dealfolio_storage_sqlite::ledger::LedgerRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn repository(db: &common::TestDb) -> LedgerRepository {
    LedgerRepository::new(Arc::clone(&db.pool))
}

fn scope() -> ExcludedScope {
    ExcludedScope::new("fund-i", NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
}

/// One vehicle, one portfolio date, a row in every excluded category plus
/// two normal investment rows.
fn seed_mixed_ledger(db: &common::TestDb) {
    // Normal investment positions
    seed_entry(
        db,
        EntryFixture {
            id: "n1",
            project_id: "aave",
            delta_cost: "300",
            outcome_type: Some("Win"),
            unrealized_mv: "700",
            total_mv: "700",
            ..Default::default()
        },
    );
    seed_entry(
        db,
        EntryFixture {
            id: "n2",
            project_id: "uni",
            delta_cost: "200",
            unrealized_mv: "100",
            realized_mv: "50",
            total_mv: "150",
            ..Default::default()
        },
    );
    // Cash by outcome type, one of them on a sentinel project id
    seed_entry(
        db,
        EntryFixture {
            id: "c1",
            project_id: "USDC",
            delta_cost: "1000",
            outcome_type: Some("Cash"),
            unrealized_mv: "1000",
            total_mv: "1000",
            ..Default::default()
        },
    );
    seed_entry(
        db,
        EntryFixture {
            id: "c2",
            project_id: "Flows",
            delta_cost: "500",
            outcome_type: Some("Cash"),
            unrealized_mv: "500",
            total_mv: "500",
            ..Default::default()
        },
    );
    // Flows
    seed_entry(
        db,
        EntryFixture {
            id: "f1",
            project_id: "Flows",
            delta_cost: "-250",
            unrealized_mv: "0",
            realized_mv: "-250",
            total_mv: "-250",
            reported_date: "2025-05-15",
            ..Default::default()
        },
    );
    // NAV adjustments
    seed_entry(
        db,
        EntryFixture {
            id: "v1",
            project_id: "NAV Adjustments",
            delta_cost: "75",
            unrealized_mv: "75",
            total_mv: "75",
            ..Default::default()
        },
    );
    // Other assets
    seed_entry(
        db,
        EntryFixture {
            id: "o1",
            project_id: "Other Assets",
            delta_cost: "120",
            unrealized_mv: "80",
            realized_mv: "40",
            total_mv: "120",
            ..Default::default()
        },
    );
}

// ==================== Cost attribution ====================

#[test]
fn test_attribution_excludes_cash_and_placeholder_rows() {
    let db = setup();
    seed_mixed_ledger(&db);

    let costs = repository(&db).attributed_costs(Some("fund-i")).unwrap();

    // Cash rows and 'Other Assets' never attribute; the flow and NAV
    // sentinels keep their sums but are not projects.
    let by_project: Vec<(&str, Decimal)> = costs
        .iter()
        .map(|c| (c.project_id.as_str(), c.cost))
        .collect();
    assert!(by_project.contains(&("aave", dec!(300))));
    assert!(by_project.contains(&("uni", dec!(200))));
    assert!(!by_project.iter().any(|(id, _)| *id == "USDC"));
    assert!(!by_project.iter().any(|(id, _)| *id == "Other Assets"));
}

#[test]
fn test_attribution_sums_one_project_across_rows() {
    let db = setup();
    seed_entry(
        &db,
        EntryFixture {
            id: "e1",
            project_id: "aave",
            delta_cost: "300",
            ..Default::default()
        },
    );
    seed_entry(
        &db,
        EntryFixture {
            id: "e2",
            project_id: "aave",
            delta_cost: "500",
            outcome_type: Some("Cash"),
            ..Default::default()
        },
    );
    seed_entry(
        &db,
        EntryFixture {
            id: "e3",
            project_id: "aave",
            delta_cost: "-100",
            ..Default::default()
        },
    );

    let costs = repository(&db).attributed_costs(None).unwrap();
    assert_eq!(costs.len(), 1);
    assert_eq!(costs[0].project_id, "aave");
    assert_eq!(costs[0].cost, dec!(200));
}

#[test]
fn test_attribution_vehicle_scope() {
    let db = setup();
    seed_entry(
        &db,
        EntryFixture {
            id: "e1",
            project_id: "aave",
            vehicle_id: "fund-i",
            delta_cost: "100",
            ..Default::default()
        },
    );
    seed_entry(
        &db,
        EntryFixture {
            id: "e2",
            project_id: "aave",
            vehicle_id: "fund-ii",
            delta_cost: "900",
            ..Default::default()
        },
    );

    let repo = repository(&db);
    let scoped = repo.attributed_costs(Some("fund-i")).unwrap();
    assert_eq!(scoped[0].cost, dec!(100));

    let global = repo.attributed_costs(None).unwrap();
    assert_eq!(global[0].cost, dec!(1000));
}

// ==================== Excluded categories ====================

#[test]
fn test_category_totals_partition_the_excluded_rows() {
    let db = setup();
    seed_mixed_ledger(&db);

    let totals = repository(&db).excluded_category_totals(&scope()).unwrap();
    assert_eq!(totals.len(), ExcludedCategory::ALL.len());

    let get = |category: ExcludedCategory| {
        totals.iter().find(|t| t.category == category).unwrap()
    };

    // The cash outcome wins over the sentinel project id: c2 is Cash, not a
    // flow.
    let cash = get(ExcludedCategory::Cash);
    assert_eq!(cash.project_count, 2);
    assert_eq!(cash.cost, dec!(1500));
    assert_eq!(cash.total_mv, dec!(1500));

    let flows = get(ExcludedCategory::Flows);
    assert_eq!(flows.project_count, 1);
    assert_eq!(flows.cost, dec!(-250));
    assert_eq!(flows.realized_mv, dec!(-250));

    let nav = get(ExcludedCategory::NavAdjustments);
    assert_eq!(nav.project_count, 1);
    assert_eq!(nav.cost, dec!(75));

    let other = get(ExcludedCategory::OtherAssets);
    assert_eq!(other.project_count, 1);
    assert_eq!(other.cost, dec!(120));
    assert_eq!(other.unrealized_mv, dec!(80));
    assert_eq!(other.realized_mv, dec!(40));

    // total_mv stays the sum of its components after aggregation
    for totals in &totals {
        assert_eq!(totals.total_mv, totals.unrealized_mv + totals.realized_mv);
    }
}

#[test]
fn test_category_totals_zero_fill_absent_categories() {
    let db = setup();
    seed_entry(
        &db,
        EntryFixture {
            id: "c1",
            project_id: "USDC",
            delta_cost: "100",
            outcome_type: Some("Cash"),
            ..Default::default()
        },
    );

    let totals = repository(&db).excluded_category_totals(&scope()).unwrap();
    assert_eq!(totals.len(), ExcludedCategory::ALL.len());
    let flows = totals
        .iter()
        .find(|t| t.category == ExcludedCategory::Flows)
        .unwrap();
    assert_eq!(flows.project_count, 0);
    assert_eq!(flows.cost, dec!(0));
}

#[test]
fn test_category_totals_respect_scope() {
    let db = setup();
    seed_mixed_ledger(&db);
    // Same vehicle, different snapshot date: invisible to the scope.
    seed_entry(
        &db,
        EntryFixture {
            id: "x1",
            project_id: "Flows",
            delta_cost: "999",
            portfolio_date: "2025-03-31",
            reported_date: "2025-03-31",
            ..Default::default()
        },
    );
    // Different vehicle entirely.
    seed_entry(
        &db,
        EntryFixture {
            id: "x2",
            project_id: "Flows",
            vehicle_id: "fund-ii",
            delta_cost: "999",
            ..Default::default()
        },
    );

    let totals = repository(&db).excluded_category_totals(&scope()).unwrap();
    let flows = totals
        .iter()
        .find(|t| t.category == ExcludedCategory::Flows)
        .unwrap();
    assert_eq!(flows.cost, dec!(-250));
}

#[test]
fn test_reported_date_range_narrows_the_scope() {
    let db = setup();
    seed_mixed_ledger(&db);

    let mut narrowed = scope();
    narrowed.reported_from = Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

    let totals = repository(&db)
        .excluded_category_totals(&narrowed)
        .unwrap();
    // The flow row was reported 2025-05-15 and falls out of range.
    let flows = totals
        .iter()
        .find(|t| t.category == ExcludedCategory::Flows)
        .unwrap();
    assert_eq!(flows.project_count, 0);

    let grand = repository(&db).excluded_grand_totals(&narrowed).unwrap();
    assert_eq!(grand.project_count, 4);
}

// ==================== Reconciliation ====================

#[test]
fn test_category_sums_reconcile_with_grand_totals() {
    let db = setup();
    seed_mixed_ledger(&db);

    let repo = repository(&db);
    let categories = repo.excluded_category_totals(&scope()).unwrap();
    let grand = repo.excluded_grand_totals(&scope()).unwrap();

    assert_eq!(grand.project_count, 5);
    assert_eq!(grand.cost, dec!(1445));

    let reconciliation = Reconciliation::check(categories, grand);
    assert!(reconciliation.balanced);
}

#[test]
fn test_empty_scope_reconciles_to_zero() {
    let db = setup();

    let repo = repository(&db);
    let categories = repo.excluded_category_totals(&scope()).unwrap();
    let grand = repo.excluded_grand_totals(&scope()).unwrap();

    assert_eq!(grand.project_count, 0);
    assert_eq!(grand.cost, dec!(0));
    assert!(Reconciliation::check(categories, grand).balanced);
}

// ==================== Drill-down detail ====================

#[test]
fn test_detail_rows_sum_to_the_category_aggregate() {
    let db = setup();
    seed_mixed_ledger(&db);

    let repo = repository(&db);
    let totals = repo.excluded_category_totals(&scope()).unwrap();
    let cash = totals
        .iter()
        .find(|t| t.category == ExcludedCategory::Cash)
        .unwrap();

    let detail = repo
        .excluded_category_detail(&scope(), ExcludedCategory::Cash)
        .unwrap();
    assert_eq!(detail.len() as i64, cash.project_count);
    assert_eq!(detail.iter().map(|d| d.cost).sum::<Decimal>(), cash.cost);
    assert_eq!(
        detail.iter().map(|d| d.total_mv).sum::<Decimal>(),
        cash.total_mv
    );
}

#[test]
fn test_detail_partition_matches_the_aggregate_case_order() {
    let db = setup();
    seed_mixed_ledger(&db);

    // The cash-outcome row on the 'Flows' project id belongs to Cash, so
    // the Flows drill-down must not include it.
    let flows_detail = repository(&db)
        .excluded_category_detail(&scope(), ExcludedCategory::Flows)
        .unwrap();
    assert_eq!(flows_detail.len(), 1);
    assert_eq!(flows_detail[0].cost, dec!(-250));

    let cash_detail = repository(&db)
        .excluded_category_detail(&scope(), ExcludedCategory::Cash)
        .unwrap();
    let ids: Vec<&str> = cash_detail.iter().map(|d| d.project_id.as_str()).collect();
    assert_eq!(ids, vec!["Flows", "USDC"]);
}

#[test]
fn test_detail_order_is_deterministic() {
    let db = setup();
    for (id, cost) in [("d1", "30"), ("d2", "10"), ("d3", "20")] {
        seed_entry(
            &db,
            EntryFixture {
                id,
                project_id: "Other Assets",
                delta_cost: cost,
                ..Default::default()
            },
        );
    }

    let detail = repository(&db)
        .excluded_category_detail(&scope(), ExcludedCategory::OtherAssets)
        .unwrap();
    let costs: Vec<Decimal> = detail.iter().map(|d| d.cost).collect();
    assert_eq!(costs, vec![dec!(10), dec!(20), dec!(30)]);
}
