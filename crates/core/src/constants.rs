/// Number of enrichment fields that participate in the completeness score.
pub const ENRICHMENT_FIELD_COUNT: u32 = 6;

/// Projects with fewer filled enrichment fields than this need attention.
pub const NEEDS_ATTENTION_THRESHOLD: u32 = 3;

/// Reserved outcome type marking a cash ledger row. Cash rows never
/// contribute to a project's attributed cost.
pub const CASH_OUTCOME_TYPE: &str = "Cash";

/// Reserved project identifier for non-investment placeholder rows.
pub const OTHER_ASSETS_PROJECT_ID: &str = "Other Assets";

/// Reserved project identifier for capital-flow rows (contributions and
/// distributions).
pub const FLOWS_PROJECT_ID: &str = "Flows";

/// Reserved project identifier for NAV adjustment rows.
pub const NAV_ADJUSTMENTS_PROJECT_ID: &str = "NAV Adjustments";

/// Default page number for project listings (1-indexed).
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for project listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;
