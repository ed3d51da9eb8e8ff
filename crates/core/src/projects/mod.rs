//! Projects module - domain models, services, and traits.

mod projects_model;
mod projects_service;
mod projects_traits;


// Re-export the public interface
pub use projects_model::{
    completeness_score, total_pages, CorpusStats, EnrichmentField, FieldFillRates, Project,
    ProjectCostRecord, ProjectPage, ProjectQuery, ProjectRow, ProjectSearchResult, ProjectSortBy,
    SortDirection,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
