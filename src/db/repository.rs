//! Repository trait for season data access.
//!
//! The core never touches files or the network itself; everything it reads
//! comes through this interface. Storage backends (in-memory, CSV folders,
//! a database) implement it and can be swapped without touching the services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::SeasonId;
use crate::models::{DriverEntry, Race, RawResultRow, SeasonDataset, SessionKind, TeamEntry};

pub use super::error::{ErrorContext, RepositoryError, RepositoryResult};

/// Lightweight season listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub name: String,
    pub race_count: usize,
}

/// Repository trait for season storage.
///
/// Registry fetches (`fetch_races`, `fetch_driver_roster`, `fetch_teams`)
/// fail with a `ConfigurationError` when the season itself is missing; a
/// configured season with nothing in it yet yields empty vectors. A missing
/// session table is `Ok(None)` — downstream substitutes the default scoring
/// template rather than failing.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// List configured seasons, sorted by name.
    async fn list_seasons(&self) -> RepositoryResult<Vec<SeasonInfo>>;

    /// Race registry for a season, in declaration order.
    async fn fetch_races(&self, season: &SeasonId) -> RepositoryResult<Vec<Race>>;

    /// Driver roster for a season.
    async fn fetch_driver_roster(&self, season: &SeasonId) -> RepositoryResult<Vec<DriverEntry>>;

    /// Team registry for a season.
    async fn fetch_teams(&self, season: &SeasonId) -> RepositoryResult<Vec<TeamEntry>>;

    /// Stored rows for one session table, `Ok(None)` when nothing is filed.
    async fn fetch_session_results(
        &self,
        season: &SeasonId,
        country: &str,
        kind: SessionKind,
    ) -> RepositoryResult<Option<Vec<RawResultRow>>>;

    /// Create or replace a season dataset.
    async fn store_season(
        &self,
        season: &SeasonId,
        dataset: SeasonDataset,
    ) -> RepositoryResult<()>;

    /// Store one session table for an already configured season.
    async fn store_session_results(
        &self,
        season: &SeasonId,
        country: &str,
        kind: SessionKind,
        rows: Vec<RawResultRow>,
    ) -> RepositoryResult<()>;

    /// Connectivity/liveness check.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
