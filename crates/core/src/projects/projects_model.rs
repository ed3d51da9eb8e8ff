//! Project domain models: the project universe, completeness scoring, and
//! the paginated listing types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ENRICHMENT_FIELD_COUNT};

/// The closed set of enrichment fields that participate in the completeness
/// score. No other project attribute may contribute to the score, and filter
/// parameters naming anything outside this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentField {
    CoingeckoId,
    ProjectStack,
    ProjectTag,
    ProjectSubTag,
    Website,
    Description,
}

impl EnrichmentField {
    /// All enrichment fields, in scoring order.
    pub const ALL: [EnrichmentField; 6] = [
        EnrichmentField::CoingeckoId,
        EnrichmentField::ProjectStack,
        EnrichmentField::ProjectTag,
        EnrichmentField::ProjectSubTag,
        EnrichmentField::Website,
        EnrichmentField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentField::CoingeckoId => "coingecko_id",
            EnrichmentField::ProjectStack => "project_stack",
            EnrichmentField::ProjectTag => "project_tag",
            EnrichmentField::ProjectSubTag => "project_sub_tag",
            EnrichmentField::Website => "website",
            EnrichmentField::Description => "description",
        }
    }

    /// Parses a field name from a caller-supplied filter parameter.
    ///
    /// Returns `None` for anything outside the recognized set; callers treat
    /// that as "no filter", not as an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "coingecko_id" => Some(EnrichmentField::CoingeckoId),
            "project_stack" => Some(EnrichmentField::ProjectStack),
            "project_tag" => Some(EnrichmentField::ProjectTag),
            "project_sub_tag" => Some(EnrichmentField::ProjectSubTag),
            "website" => Some(EnrichmentField::Website),
            "description" => Some(EnrichmentField::Description),
            _ => None,
        }
    }
}

/// Domain model representing a tracked project in the universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub coingecko_id: Option<String>,
    pub project_stack: Option<String>,
    pub project_tag: Option<String>,
    pub project_sub_tag: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl Project {
    /// Returns the raw value of one enrichment field.
    pub fn field(&self, field: EnrichmentField) -> Option<&str> {
        match field {
            EnrichmentField::CoingeckoId => self.coingecko_id.as_deref(),
            EnrichmentField::ProjectStack => self.project_stack.as_deref(),
            EnrichmentField::ProjectTag => self.project_tag.as_deref(),
            EnrichmentField::ProjectSubTag => self.project_sub_tag.as_deref(),
            EnrichmentField::Website => self.website.as_deref(),
            EnrichmentField::Description => self.description.as_deref(),
        }
    }

    /// Number of enrichment fields that are present and non-empty.
    ///
    /// A field counts as filled iff it is non-null and non-empty after
    /// trimming. This is the single scoring rule; the storage layer's SQL
    /// aggregate mirrors it and the integration tests pin the two together.
    pub fn filled_count(&self) -> u32 {
        EnrichmentField::ALL
            .iter()
            .filter(|field| is_filled(self.field(**field)))
            .count() as u32
    }

    /// Completeness percentage, 0-100.
    pub fn completeness(&self) -> u32 {
        completeness_score(self.filled_count())
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Maps a filled-field count to the rounded 0-100 completeness percentage.
pub fn completeness_score(filled_count: u32) -> u32 {
    ((filled_count as f64 / ENRICHMENT_FIELD_COUNT as f64) * 100.0).round() as u32
}

/// Total page count for a listing: `max(1, ceil(total_count / page_size))`.
/// An empty result set still has one (empty) page.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 1;
    }
    ((total_count + page_size - 1) / page_size).max(1)
}

/// Sort key for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSortBy {
    #[default]
    Completeness,
    ProjectId,
    Cost,
}

/// Sort direction for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Parameters for a filtered, paginated project listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    /// Restrict the universe to projects held by this vehicle.
    pub vehicle_id: Option<String>,
    /// Case-insensitive substring match against the project identifier.
    pub search: Option<String>,
    /// Keep only projects where this enrichment field is null or empty.
    /// Unrecognized field names never reach this point; they parse to `None`.
    pub missing_field: Option<EnrichmentField>,
    pub sort_by: ProjectSortBy,
    pub sort_dir: SortDirection,
    /// 1-indexed page number.
    pub page: i64,
    pub page_size: i64,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            vehicle_id: None,
            search: None,
            missing_field: None,
            sort_by: ProjectSortBy::default(),
            sort_dir: SortDirection::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProjectQuery {
    /// Clamps page and page size to usable values.
    pub fn normalized(mut self) -> Self {
        if self.page < 1 {
            self.page = DEFAULT_PAGE;
        }
        if self.page_size < 1 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    /// Offset of the first row of the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// A project as fetched by the repository, joined with its attributed cost.
#[derive(Debug, Clone)]
pub struct ProjectCostRecord {
    pub project: Project,
    /// Attributed cost, already coalesced to zero for projects with no
    /// ledger rows.
    pub cost: Decimal,
}

/// One windowed fetch plus the independently computed total row count.
#[derive(Debug, Clone)]
pub struct ProjectSearchResult {
    pub rows: Vec<ProjectCostRecord>,
    pub total_count: i64,
}

/// One row of a project listing as served to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    pub id: String,
    pub coingecko_id: Option<String>,
    pub project_stack: Option<String>,
    pub project_tag: Option<String>,
    pub project_sub_tag: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub filled_count: u32,
    pub completeness: u32,
    pub cost: Decimal,
    /// `project_stack` parsed into individual tags for display.
    pub stack_list: Vec<String>,
}

/// A page of project rows plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub rows: Vec<ProjectRow>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl ProjectPage {
    /// The degraded "no data" page: no rows, one empty page.
    pub fn empty(page: i64, page_size: i64) -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
            page,
            page_size,
            total_pages: 1,
        }
    }
}

/// Per-field fill rates across the project universe, 0-100 each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFillRates {
    pub coingecko_id: u32,
    pub project_stack: u32,
    pub project_tag: u32,
    pub project_sub_tag: u32,
    pub website: u32,
    pub description: u32,
}

impl FieldFillRates {
    pub fn get(&self, field: EnrichmentField) -> u32 {
        match field {
            EnrichmentField::CoingeckoId => self.coingecko_id,
            EnrichmentField::ProjectStack => self.project_stack,
            EnrichmentField::ProjectTag => self.project_tag,
            EnrichmentField::ProjectSubTag => self.project_sub_tag,
            EnrichmentField::Website => self.website,
            EnrichmentField::Description => self.description,
        }
    }

    pub fn set(&mut self, field: EnrichmentField, rate: u32) {
        match field {
            EnrichmentField::CoingeckoId => self.coingecko_id = rate,
            EnrichmentField::ProjectStack => self.project_stack = rate,
            EnrichmentField::ProjectTag => self.project_tag = rate,
            EnrichmentField::ProjectSubTag => self.project_sub_tag = rate,
            EnrichmentField::Website => self.website = rate,
            EnrichmentField::Description => self.description = rate,
        }
    }
}

/// Corpus-wide completeness statistics, computed fresh per request.
///
/// The all-zero value is the first-class result for an empty universe (and
/// the degraded result when the store is unavailable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total_projects: i64,
    /// Average of the per-project completeness percentages, rounded once at
    /// the end (the aggregate averages unrounded percentages).
    pub avg_completeness: u32,
    /// Projects with all 6 enrichment fields filled.
    pub fully_enriched: i64,
    /// Projects with fewer than 3 enrichment fields filled.
    pub needs_attention: i64,
    pub fill_rates: FieldFillRates,
}
