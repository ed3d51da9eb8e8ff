//! Project repository and service traits.
//!
//! These traits define the contract for project-universe reads without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::projects_model::{CorpusStats, ProjectPage, ProjectQuery, ProjectSearchResult};
use crate::errors::Result;

/// Trait defining the contract for project repository operations.
///
/// Implementations read the project universe and the ledger-derived cost
/// attribution; this engine never writes to either table.
pub trait ProjectRepositoryTrait: Send + Sync {
    /// Computes corpus-wide completeness statistics in a single aggregate
    /// query, optionally scoped to one vehicle's universe.
    ///
    /// The average must be taken over unrounded per-project percentages and
    /// all rates must degrade to zero for an empty universe rather than
    /// dividing by zero.
    fn corpus_stats(&self, vehicle_id: Option<&str>) -> Result<CorpusStats>;

    /// Runs the filtered, sorted, windowed project fetch plus the
    /// independent count query.
    ///
    /// The count and the window are two separate reads, not one snapshot;
    /// rows written between them can shift the window against the count.
    fn search_projects(&self, query: &ProjectQuery) -> Result<ProjectSearchResult>;
}

/// Trait defining the contract for the project reporting service.
///
/// Operations degrade to empty/zeroed results on data-access failure; a
/// reporting surface prefers "no data" over a hard error.
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    /// Corpus completeness statistics, optionally scoped to one vehicle.
    async fn completeness_stats(&self, vehicle_id: Option<&str>) -> CorpusStats;

    /// One page of the filtered project listing joined with attributed cost.
    async fn project_page(&self, query: ProjectQuery) -> ProjectPage;
}
