//! Standings accumulation.
//!
//! Groups normalized records per race and entity, orders races
//! chronologically, and produces the cumulative points series every chart and
//! projection is built from. Each series is seeded with a synthetic zero
//! baseline slot so all entities share a common origin.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::api::{EntityKind, SeasonId};
use crate::db::repository::{RepositoryError, RepositoryResult, SeasonRepository};
use crate::models::ScoringTable;

use super::normalizer::{self, ResultTable};

/// Label of the synthetic zero-point slot prepended before the first race.
pub const BASELINE_LABEL: &str = "Start";

/// One slot on the race axis. Slot 0 of a table is always the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSlot {
    pub label: String,
    pub end_date: NaiveDate,
    pub has_sprint: bool,
}

/// Cumulative and per-race points for one entity, aligned with the race axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySeries {
    pub name: String,
    /// Team attribution for coloring. The roster snapshot wins over whatever
    /// the result rows recorded; `None` for the unattributed bucket.
    pub team: Option<String>,
    pub cumulative: Vec<f64>,
    pub per_race: Vec<f64>,
}

/// Long-form row of the cumulative table, race-major in axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub race: String,
    pub entity: String,
    pub team: Option<String>,
    pub points: f64,
}

/// Cumulative points per entity across the ordered race axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub entity_kind: EntityKind,
    pub race_axis: Vec<RaceSlot>,
    pub series: Vec<EntitySeries>,
}

impl StandingsTable {
    pub fn entity(&self, name: &str) -> Option<&EntitySeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Number of real races on the axis (excluding the baseline slot).
    pub fn race_count(&self) -> usize {
        self.race_axis.len().saturating_sub(1)
    }

    /// Long-form view of the cumulative table, race-major.
    pub fn long_form(&self) -> Vec<StandingsRow> {
        let mut rows = Vec::with_capacity(self.race_axis.len() * self.series.len());
        for (slot_idx, slot) in self.race_axis.iter().enumerate() {
            for series in &self.series {
                rows.push(StandingsRow {
                    race: slot.label.clone(),
                    entity: series.name.clone(),
                    team: series.team.clone(),
                    points: series.cumulative[slot_idx],
                });
            }
        }
        rows
    }
}

/// Accumulate normalized records into a cumulative standings table.
///
/// Grouped point sums are ordered by `(end_date, team, entity)`; that order
/// fixes the tie-break when races share an end date and the column/stacking
/// order of the output. Entities known from the registries but absent from
/// the records still get a flat zero series.
pub fn accumulate(table: &ResultTable, kind: EntityKind) -> StandingsTable {
    let axis_index: HashMap<&str, usize> = table
        .races
        .iter()
        .enumerate()
        .map(|(i, r)| (r.country.as_str(), i))
        .collect();
    let end_date: HashMap<&str, NaiveDate> = table
        .races
        .iter()
        .map(|r| (r.country.as_str(), r.end_date))
        .collect();

    // 1. per-(race, team, entity) point sums
    let mut grouped: HashMap<(String, String, String), f64> = HashMap::new();
    for rec in &table.records {
        let entity = match kind {
            EntityKind::Driver => rec.driver_name.clone().unwrap_or_default(),
            EntityKind::Team => rec.team_name.clone().unwrap_or_default(),
        };
        let team = match kind {
            EntityKind::Driver => rec.team_name.clone().unwrap_or_default(),
            EntityKind::Team => entity.clone(),
        };
        *grouped
            .entry((rec.country.clone(), team, entity))
            .or_insert(0.0) += rec.points;
    }

    // collapsed per-(race, entity) view: an entity is summed once per race
    // even if its recorded team varies within a weekend
    let mut race_entity: HashMap<(&str, &str), f64> = HashMap::new();
    for ((country, _, entity), points) in &grouped {
        *race_entity
            .entry((country.as_str(), entity.as_str()))
            .or_insert(0.0) += points;
    }

    // 2. sort grouped rows by (end_date, team, entity); axis index breaks
    //    same-day ties deterministically
    let mut sorted: Vec<(NaiveDate, &str, &str, usize)> = grouped
        .keys()
        .map(|(country, team, entity)| {
            (
                end_date.get(country.as_str()).copied().unwrap_or_default(),
                team.as_str(),
                entity.as_str(),
                axis_index.get(country.as_str()).copied().unwrap_or(0),
            )
        })
        .collect();
    sorted.sort();

    // entity column order: first occurrence in the sorted grouped rows,
    // registry-only entities appended in declaration order
    let mut order: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut observed_team: HashMap<String, String> = HashMap::new();
    for (_, team, entity, _) in &sorted {
        if seen.insert(entity.to_string()) {
            order.push(entity.to_string());
        }
        observed_team
            .entry(entity.to_string())
            .or_insert_with(|| team.to_string());
    }
    match kind {
        EntityKind::Driver => {
            for driver in &table.roster {
                if seen.insert(driver.driver_name.clone()) {
                    order.push(driver.driver_name.clone());
                }
            }
        }
        EntityKind::Team => {
            for team in &table.teams {
                if seen.insert(team.team_name.clone()) {
                    order.push(team.team_name.clone());
                }
            }
        }
    }

    let roster_team: HashMap<&str, &str> = table
        .roster
        .iter()
        .map(|d| (d.driver_name.as_str(), d.team_name.as_str()))
        .collect();

    // 3.-5. race axis with a leading baseline slot, per-race totals, prefix
    //       sums down every column
    let baseline_date = table
        .races
        .first()
        .map(|r| r.start_date.pred_opt().unwrap_or(r.start_date))
        .unwrap_or_default();
    let mut race_axis = Vec::with_capacity(table.races.len() + 1);
    race_axis.push(RaceSlot {
        label: BASELINE_LABEL.to_string(),
        end_date: baseline_date,
        has_sprint: false,
    });
    for race in &table.races {
        race_axis.push(RaceSlot {
            label: race.country.clone(),
            end_date: race.end_date,
            has_sprint: race.has_sprint,
        });
    }

    let series = order
        .into_iter()
        .map(|name| {
            let team = match kind {
                EntityKind::Team => (!name.is_empty()).then(|| name.clone()),
                EntityKind::Driver => roster_team
                    .get(name.as_str())
                    .map(|t| t.to_string())
                    .or_else(|| observed_team.get(&name).cloned())
                    .filter(|t| !t.is_empty()),
            };
            let mut per_race = Vec::with_capacity(race_axis.len());
            let mut cumulative = Vec::with_capacity(race_axis.len());
            per_race.push(0.0);
            cumulative.push(0.0);
            let mut total = 0.0;
            for race in &table.races {
                let points = race_entity
                    .get(&(race.country.as_str(), name.as_str()))
                    .copied()
                    .unwrap_or(0.0);
                total += points;
                per_race.push(points);
                cumulative.push(total);
            }
            EntitySeries {
                name,
                team,
                cumulative,
                per_race,
            }
        })
        .collect();

    StandingsTable {
        entity_kind: kind,
        race_axis,
        series,
    }
}

/// Fetch, normalize, and accumulate the standings for one season.
pub async fn get_standings(
    repo: &dyn SeasonRepository,
    season: &SeasonId,
    kind: EntityKind,
    scoring: &ScoringTable,
) -> RepositoryResult<StandingsTable> {
    let table = normalizer::get_result_table(repo, season, scoring).await?;
    Ok(accumulate(&table, kind))
}

/// Synchronous wrapper over [`get_standings`] using the global repository,
/// for presentation code without an async runtime.
pub fn blocking_get_standings(
    season: &SeasonId,
    kind: EntityKind,
    scoring: &ScoringTable,
) -> RepositoryResult<StandingsTable> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| RepositoryError::internal(format!("failed to create async runtime: {}", e)))?;
    let repo = crate::db::get_repository()
        .map_err(|e| RepositoryError::configuration(e.to_string()))?;
    runtime.block_on(get_standings(repo.as_ref(), season, kind, scoring))
}
