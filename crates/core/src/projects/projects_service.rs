use log::{debug, error};
use std::sync::Arc;

use super::projects_model::{
    completeness_score, total_pages, CorpusStats, ProjectPage, ProjectQuery, ProjectRow,
};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::utils::tags::parse_tag_list;

/// Service for the project listing and completeness statistics.
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    async fn completeness_stats(&self, vehicle_id: Option<&str>) -> CorpusStats {
        debug!("Computing corpus stats, vehicle: {:?}", vehicle_id);
        match self.repository.corpus_stats(vehicle_id) {
            Ok(stats) => stats,
            Err(e) => {
                error!("Corpus stats query failed, returning empty stats: {}", e);
                CorpusStats::default()
            }
        }
    }

    async fn project_page(&self, query: ProjectQuery) -> ProjectPage {
        let query = query.normalized();
        debug!(
            "Listing projects: page {} size {} sort {:?} {:?}",
            query.page, query.page_size, query.sort_by, query.sort_dir
        );

        let result = match self.repository.search_projects(&query) {
            Ok(result) => result,
            Err(e) => {
                error!("Project search failed, returning empty page: {}", e);
                return ProjectPage::empty(query.page, query.page_size);
            }
        };

        let rows = result
            .rows
            .into_iter()
            .map(|record| {
                let project = record.project;
                // Score through the one shared rule so the listing can never
                // drift from the corpus statistics.
                let filled_count = project.filled_count();
                let stack_list = project
                    .project_stack
                    .as_deref()
                    .map(parse_tag_list)
                    .unwrap_or_default();
                ProjectRow {
                    id: project.id,
                    coingecko_id: project.coingecko_id,
                    project_stack: project.project_stack,
                    project_tag: project.project_tag,
                    project_sub_tag: project.project_sub_tag,
                    website: project.website,
                    description: project.description,
                    logo_url: project.logo_url,
                    filled_count,
                    completeness: completeness_score(filled_count),
                    cost: record.cost,
                    stack_list,
                }
            })
            .collect();

        ProjectPage {
            rows,
            total_count: result.total_count,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_pages(result.total_count, query.page_size),
        }
    }
}
