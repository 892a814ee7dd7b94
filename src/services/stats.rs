//! Aggregate statistics over the normalized result table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{EntityKind, SeasonId};
use crate::db::repository::{RepositoryError, RepositoryResult, SeasonRepository};
use crate::models::{ResultRecord, ScoringTable};

use super::normalizer;
use super::pivot::PivotTable;

/// How per-entity points are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateMethod {
    Mean,
    Sum,
}

/// Which sessions feed the position-frequency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionFilter {
    RaceOnly,
    SprintOnly,
    Both,
}

impl SessionFilter {
    fn matches(&self, is_sprint: bool) -> bool {
        match self {
            SessionFilter::RaceOnly => !is_sprint,
            SessionFilter::SprintOnly => is_sprint,
            SessionFilter::Both => true,
        }
    }
}

/// One row of an aggregate ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAggregate {
    pub entity: String,
    pub value: f64,
}

fn entity_name(record: &ResultRecord, kind: EntityKind) -> String {
    match kind {
        EntityKind::Driver => record.driver_name.clone().unwrap_or_default(),
        EntityKind::Team => record.team_name.clone().unwrap_or_default(),
    }
}

/// Aggregate points per entity, sorted descending by value (name ascending on
/// ties so the ranking is deterministic).
pub fn aggregate_points(
    records: &[ResultRecord],
    method: AggregateMethod,
    kind: EntityKind,
) -> Vec<EntityAggregate> {
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = sums.entry(entity_name(record, kind)).or_insert((0.0, 0));
        entry.0 += record.points;
        entry.1 += 1;
    }

    let mut aggregates: Vec<EntityAggregate> = sums
        .into_iter()
        .map(|(entity, (sum, count))| {
            let value = match method {
                AggregateMethod::Sum => sum,
                AggregateMethod::Mean => {
                    if count > 0 {
                        sum / count as f64
                    } else {
                        0.0
                    }
                }
            };
            EntityAggregate { entity, value }
        })
        .collect();

    aggregates.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entity.cmp(&b.entity))
    });
    aggregates
}

/// Count of times each entity finished in each numeric position.
///
/// Columns are contiguous positions "1"..="max observed"; rows follow the
/// caller-supplied display order with missing combinations filled with 0.
/// Position-0 bonus pseudo-entries are not finishing positions and are
/// excluded.
pub fn position_frequency(
    records: &[ResultRecord],
    kind: EntityKind,
    filter: SessionFilter,
    display_order: &[String],
) -> PivotTable {
    let mut counts: HashMap<(String, u32), f64> = HashMap::new();
    let mut max_position = 0;
    for record in records {
        if record.position == 0 || !filter.matches(record.is_sprint) {
            continue;
        }
        max_position = max_position.max(record.position);
        *counts
            .entry((entity_name(record, kind), record.position))
            .or_insert(0.0) += 1.0;
    }

    let columns: Vec<String> = (1..=max_position).map(|p| p.to_string()).collect();
    let values = display_order
        .iter()
        .map(|entity| {
            (1..=max_position)
                .map(|position| {
                    counts
                        .get(&(entity.clone(), position))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    PivotTable {
        index: display_order.to_vec(),
        columns,
        values,
    }
}

/// Fetch and aggregate points for one season.
pub async fn get_aggregate_points(
    repo: &dyn SeasonRepository,
    season: &SeasonId,
    method: AggregateMethod,
    kind: EntityKind,
    scoring: &ScoringTable,
) -> RepositoryResult<Vec<EntityAggregate>> {
    let table = normalizer::get_result_table(repo, season, scoring).await?;
    Ok(aggregate_points(&table.records, method, kind))
}

/// Fetch and compute the position-frequency matrix for one season.
pub async fn get_position_frequency(
    repo: &dyn SeasonRepository,
    season: &SeasonId,
    kind: EntityKind,
    filter: SessionFilter,
    display_order: &[String],
    scoring: &ScoringTable,
) -> RepositoryResult<PivotTable> {
    let table = normalizer::get_result_table(repo, season, scoring).await?;
    Ok(position_frequency(&table.records, kind, filter, display_order))
}

/// Synchronous wrapper over [`get_aggregate_points`] using the global
/// repository.
pub fn blocking_get_aggregate_points(
    season: &SeasonId,
    method: AggregateMethod,
    kind: EntityKind,
    scoring: &ScoringTable,
) -> RepositoryResult<Vec<EntityAggregate>> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| RepositoryError::internal(format!("failed to create async runtime: {}", e)))?;
    let repo = crate::db::get_repository()
        .map_err(|e| RepositoryError::configuration(e.to_string()))?;
    runtime.block_on(get_aggregate_points(
        repo.as_ref(),
        season,
        method,
        kind,
        scoring,
    ))
}
