//! Public API surface for the standings core.
//!
//! This file consolidates the identifier newtypes, selector enums, and DTO
//! re-exports. All types derive Serialize/Deserialize so any rendering layer
//! can consume them as structured tabular data.

pub use crate::db::repository::SeasonInfo;
pub use crate::models::{
    DriverEntry, Race, RawResultRow, ResultRecord, ScoringTable, SessionKind, TeamEntry,
};
pub use crate::services::normalizer::{ResultTable, SeasonLookups, SessionTables};
pub use crate::services::pivot::{PivotTable, PivotValue};
pub use crate::services::projection::{HeadToHeadData, TrendFit};
pub use crate::services::standings::{
    EntitySeries, RaceSlot, StandingsRow, StandingsTable, BASELINE_LABEL,
};
pub use crate::services::stats::{AggregateMethod, EntityAggregate, SessionFilter};

use serde::{Deserialize, Serialize};

/// Season identifier (dataset name, e.g. "2024").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeasonId(pub String);

impl SeasonId {
    pub fn new(value: impl Into<String>) -> Self {
        SeasonId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeasonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeasonId {
    fn from(value: &str) -> Self {
        SeasonId::new(value)
    }
}

/// Aggregation axis: points per driver or per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Driver,
    Team,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Driver => "driver",
            EntityKind::Team => "team",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
