//! Result record normalization.
//!
//! Turns per-session result tables into one canonical long-form table with a
//! uniform schema across races, substituting the default scoring template for
//! races that have nothing filed yet so every configured race keeps its slot
//! on the season axis.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::SeasonId;
use crate::db::repository::{RepositoryResult, SeasonRepository};
use crate::models::{
    order_races, DriverEntry, Race, RawResultRow, ResultRecord, ScoringTable, SessionKind,
    TeamEntry,
};

/// Session tables keyed by (country, session kind).
pub type SessionTables = HashMap<(String, SessionKind), Vec<RawResultRow>>;

/// Typed lookup tables derived from the registries.
///
/// Passed explicitly into presentation calls instead of living in global
/// mutable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonLookups {
    pub driver_to_team: HashMap<String, String>,
    pub team_to_color: HashMap<String, String>,
}

/// Build the driver→team and team→color lookup tables.
pub fn build_lookups(roster: &[DriverEntry], teams: &[TeamEntry]) -> SeasonLookups {
    SeasonLookups {
        driver_to_team: roster
            .iter()
            .map(|d| (d.driver_name.clone(), d.team_name.clone()))
            .collect(),
        team_to_color: teams
            .iter()
            .map(|t| (t.team_name.clone(), t.color.clone()))
            .collect(),
    }
}

/// Canonical result table for one season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultTable {
    /// Races in chronological order; the x-axis of every downstream view.
    pub races: Vec<Race>,
    /// Normalized records, race-major in axis order.
    pub records: Vec<ResultRecord>,
    /// Driver roster the table was normalized against.
    pub roster: Vec<DriverEntry>,
    /// Team registry, in declaration order.
    pub teams: Vec<TeamEntry>,
    /// Countries whose race session was actually filed (not substituted).
    pub filed: Vec<String>,
    /// Length of the leading run of filed races in axis order; the
    /// completed-race count used by the trend projector.
    pub completed: usize,
}

/// Normalize all session tables of a season into one long-form table.
///
/// Rows whose position is not a number are dropped (DNF/DQ markers carry no
/// points). A null team with a known driver is back-filled from the roster;
/// rows failing the lookup keep `None` and are bucketed downstream, never
/// dropped.
pub fn normalize_results(
    races: &[Race],
    sessions: &SessionTables,
    roster: &[DriverEntry],
    teams: &[TeamEntry],
    scoring: &ScoringTable,
) -> ResultTable {
    let races = order_races(races);
    let driver_to_team: HashMap<&str, &str> = roster
        .iter()
        .map(|d| (d.driver_name.as_str(), d.team_name.as_str()))
        .collect();

    let mut records = Vec::new();
    let mut filed = Vec::new();

    for race in &races {
        let race_rows = sessions.get(&(race.country.clone(), SessionKind::Race));
        if race_rows.is_some() {
            filed.push(race.country.clone());
        } else {
            warn!(
                "no race results filed for '{}', substituting default scoring template",
                race.country
            );
        }
        let template;
        let rows = match race_rows {
            Some(rows) => rows,
            None => {
                template = scoring.race_template();
                &template
            }
        };
        append_session(&mut records, race, rows, SessionKind::Race, &driver_to_team);

        if race.has_sprint {
            let sprint_template;
            let sprint_rows = match sessions.get(&(race.country.clone(), SessionKind::Sprint)) {
                Some(rows) => rows,
                None => {
                    warn!(
                        "no sprint results filed for '{}', substituting default scoring template",
                        race.country
                    );
                    sprint_template = scoring.sprint_template();
                    &sprint_template
                }
            };
            append_session(
                &mut records,
                race,
                sprint_rows,
                SessionKind::Sprint,
                &driver_to_team,
            );
        }
    }

    let completed = races
        .iter()
        .take_while(|r| filed.contains(&r.country))
        .count();

    ResultTable {
        races,
        records,
        roster: roster.to_vec(),
        teams: teams.to_vec(),
        filed,
        completed,
    }
}

fn append_session(
    out: &mut Vec<ResultRecord>,
    race: &Race,
    rows: &[RawResultRow],
    kind: SessionKind,
    driver_to_team: &HashMap<&str, &str>,
) {
    for row in rows {
        let Some(position) = row.parsed_position() else {
            continue;
        };
        let team_name = row.team_name.clone().or_else(|| {
            row.driver_name
                .as_deref()
                .and_then(|driver| driver_to_team.get(driver))
                .map(|team| team.to_string())
        });
        if team_name.is_none() {
            if let Some(driver) = row.driver_name.as_deref() {
                warn!("driver '{}' has no team in the roster", driver);
            }
        }
        out.push(ResultRecord {
            country: race.country.clone(),
            end_date: race.end_date,
            position,
            driver_name: row.driver_name.clone(),
            team_name,
            points: row.points,
            is_sprint: kind.is_sprint(),
        });
    }
}

/// Fetch the registries and every filed session table for `season`, then
/// normalize.
///
/// A missing race/driver/team registry surfaces as the repository's
/// configuration error; a missing session table is substituted, not an error.
pub async fn get_result_table(
    repo: &dyn SeasonRepository,
    season: &SeasonId,
    scoring: &ScoringTable,
) -> RepositoryResult<ResultTable> {
    let races = repo.fetch_races(season).await?;
    let roster = repo.fetch_driver_roster(season).await?;
    let teams = repo.fetch_teams(season).await?;

    let mut sessions: SessionTables = HashMap::new();
    for race in &races {
        if let Some(rows) = repo
            .fetch_session_results(season, &race.country, SessionKind::Race)
            .await?
        {
            sessions.insert((race.country.clone(), SessionKind::Race), rows);
        }
        if race.has_sprint {
            if let Some(rows) = repo
                .fetch_session_results(season, &race.country, SessionKind::Sprint)
                .await?
            {
                sessions.insert((race.country.clone(), SessionKind::Sprint), rows);
            }
        }
    }

    Ok(normalize_results(&races, &sessions, &roster, &teams, scoring))
}
