//! In-memory repository for unit testing and local development.

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::api::SeasonId;
use crate::db::error::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::repository::{SeasonInfo, SeasonRepository};
use crate::models::{DriverEntry, Race, RawResultRow, SeasonDataset, SessionKind, TeamEntry};

/// In-memory season store guarded by a read-write lock.
#[derive(Default)]
pub struct LocalRepository {
    seasons: RwLock<HashMap<String, SeasonDataset>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor seeding a single season.
    pub fn with_season(season: &SeasonId, dataset: SeasonDataset) -> Self {
        let repo = Self::new();
        repo.seasons
            .write()
            .insert(season.value().to_string(), dataset);
        repo
    }

    fn missing_season(season: &SeasonId, operation: &str) -> RepositoryError {
        RepositoryError::configuration_with_context(
            format!("season '{}' is not configured", season),
            ErrorContext::new(operation)
                .with_entity("season")
                .with_entity_id(season),
        )
    }
}

#[async_trait]
impl SeasonRepository for LocalRepository {
    async fn list_seasons(&self) -> RepositoryResult<Vec<SeasonInfo>> {
        let seasons = self.seasons.read();
        let mut infos: Vec<SeasonInfo> = seasons
            .iter()
            .map(|(name, dataset)| SeasonInfo {
                name: name.clone(),
                race_count: dataset.races.len(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn fetch_races(&self, season: &SeasonId) -> RepositoryResult<Vec<Race>> {
        let seasons = self.seasons.read();
        let dataset = seasons
            .get(season.value())
            .ok_or_else(|| Self::missing_season(season, "fetch_races"))?;
        Ok(dataset.races.clone())
    }

    async fn fetch_driver_roster(&self, season: &SeasonId) -> RepositoryResult<Vec<DriverEntry>> {
        let seasons = self.seasons.read();
        let dataset = seasons
            .get(season.value())
            .ok_or_else(|| Self::missing_season(season, "fetch_driver_roster"))?;
        Ok(dataset.drivers.clone())
    }

    async fn fetch_teams(&self, season: &SeasonId) -> RepositoryResult<Vec<TeamEntry>> {
        let seasons = self.seasons.read();
        let dataset = seasons
            .get(season.value())
            .ok_or_else(|| Self::missing_season(season, "fetch_teams"))?;
        Ok(dataset.teams.clone())
    }

    async fn fetch_session_results(
        &self,
        season: &SeasonId,
        country: &str,
        kind: SessionKind,
    ) -> RepositoryResult<Option<Vec<RawResultRow>>> {
        let seasons = self.seasons.read();
        let dataset = seasons
            .get(season.value())
            .ok_or_else(|| Self::missing_season(season, "fetch_session_results"))?;
        Ok(dataset.session(country, kind).cloned())
    }

    async fn store_season(
        &self,
        season: &SeasonId,
        dataset: SeasonDataset,
    ) -> RepositoryResult<()> {
        debug!(
            "storing season '{}' ({} races, {} drivers, {} teams)",
            season,
            dataset.races.len(),
            dataset.drivers.len(),
            dataset.teams.len()
        );
        self.seasons
            .write()
            .insert(season.value().to_string(), dataset);
        Ok(())
    }

    async fn store_session_results(
        &self,
        season: &SeasonId,
        country: &str,
        kind: SessionKind,
        rows: Vec<RawResultRow>,
    ) -> RepositoryResult<()> {
        let mut seasons = self.seasons.write();
        let dataset = seasons
            .get_mut(season.value())
            .ok_or_else(|| Self::missing_season(season, "store_session_results"))?;
        if !dataset.races.iter().any(|r| r.country == country) {
            return Err(RepositoryError::validation_with_context(
                format!("race '{}' is not in the season registry", country),
                ErrorContext::new("store_session_results")
                    .with_entity("race")
                    .with_entity_id(country),
            ));
        }
        debug!(
            "storing {} session for '{}' ({} rows)",
            kind,
            country,
            rows.len()
        );
        dataset.set_session(country, kind, rows);
        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
