//! Row types for the raw project reporting queries.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use dealfolio_core::projects::{CorpusStats, FieldFillRates, Project, ProjectCostRecord};
use dealfolio_core::utils::numeric::normalize_decimal;

/// One row of the windowed project fetch, joined with attributed cost.
#[derive(QueryableByName, Debug)]
pub struct ProjectPageRowDB {
    #[diesel(sql_type = Text)]
    pub id: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub coingecko_id: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub project_stack: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub project_tag: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub project_sub_tag: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub website: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub description: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub logo_url: Option<String>,
    #[diesel(sql_type = Text)]
    pub cost: String,
}

impl From<ProjectPageRowDB> for ProjectCostRecord {
    fn from(row: ProjectPageRowDB) -> Self {
        let cost = normalize_decimal(Some(&row.cost));
        ProjectCostRecord {
            project: Project {
                id: row.id,
                coingecko_id: row.coingecko_id,
                project_stack: row.project_stack,
                project_tag: row.project_tag,
                project_sub_tag: row.project_sub_tag,
                website: row.website,
                description: row.description,
                logo_url: row.logo_url,
            },
            cost,
        }
    }
}

/// The single-row corpus statistics aggregate.
#[derive(QueryableByName, Debug)]
pub struct CorpusStatsRowDB {
    #[diesel(sql_type = BigInt)]
    pub total_projects: i64,
    /// Average of unrounded per-project percentages; rounded once here.
    #[diesel(sql_type = Double)]
    pub avg_completeness: f64,
    #[diesel(sql_type = BigInt)]
    pub fully_enriched: i64,
    #[diesel(sql_type = BigInt)]
    pub needs_attention: i64,
    #[diesel(sql_type = BigInt)]
    pub coingecko_id_filled: i64,
    #[diesel(sql_type = BigInt)]
    pub project_stack_filled: i64,
    #[diesel(sql_type = BigInt)]
    pub project_tag_filled: i64,
    #[diesel(sql_type = BigInt)]
    pub project_sub_tag_filled: i64,
    #[diesel(sql_type = BigInt)]
    pub website_filled: i64,
    #[diesel(sql_type = BigInt)]
    pub description_filled: i64,
}

impl From<CorpusStatsRowDB> for CorpusStats {
    fn from(row: CorpusStatsRowDB) -> Self {
        let total = row.total_projects;
        let fill_rate = |filled: i64| -> u32 {
            if total == 0 {
                0
            } else {
                ((filled * 100) as f64 / total as f64).round() as u32
            }
        };

        CorpusStats {
            total_projects: total,
            avg_completeness: row.avg_completeness.round() as u32,
            fully_enriched: row.fully_enriched,
            needs_attention: row.needs_attention,
            fill_rates: FieldFillRates {
                coingecko_id: fill_rate(row.coingecko_id_filled),
                project_stack: fill_rate(row.project_stack_filled),
                project_tag: fill_rate(row.project_tag_filled),
                project_sub_tag: fill_rate(row.project_sub_tag_filled),
                website: fill_rate(row.website_filled),
                description: fill_rate(row.description_filled),
            },
        }
    }
}
