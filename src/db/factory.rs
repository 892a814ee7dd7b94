//! Factory for creating repository instances.

use std::str::FromStr;
use std::sync::Arc;

use super::config::CoreConfig;
use super::error::{RepositoryError, RepositoryResult};
use super::repositories::LocalRepository;
use super::repository::SeasonRepository;

/// Available repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory backend for local development and testing.
    Local,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(RepositoryType::Local),
            other => Err(RepositoryError::configuration(format!(
                "unknown repository type '{}', expected 'local'",
                other
            ))),
        }
    }
}

/// Factory for repository construction.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository of the given type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn SeasonRepository> {
        match repo_type {
            RepositoryType::Local => Arc::new(LocalRepository::new()),
        }
    }

    /// Create the in-memory backend directly.
    pub fn create_local() -> Arc<dyn SeasonRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create the backend selected by a configuration file.
    pub fn from_config(config: &CoreConfig) -> RepositoryResult<Arc<dyn SeasonRepository>> {
        let repo_type = RepositoryType::from_str(&config.repository.repo_type)?;
        Ok(Self::create(repo_type))
    }
}
