mod model;
mod repository;

pub use model::{CorpusStatsRowDB, ProjectPageRowDB};
pub use repository::ProjectRepository;
