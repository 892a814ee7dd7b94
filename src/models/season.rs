use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Session type within a race weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Race,
    Sprint,
}

impl SessionKind {
    pub fn is_sprint(&self) -> bool {
        matches!(self, SessionKind::Sprint)
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Race => write!(f, "race"),
            SessionKind::Sprint => write!(f, "sprint"),
        }
    }
}

/// Season-level race metadata. `country` is the unique key within a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub country: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub has_sprint: bool,
}

/// Driver roster entry.
///
/// Team affiliation is the current roster snapshot; it is not frozen at race
/// time unless a result row records its own team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverEntry {
    pub driver_name: String,
    pub team_name: String,
}

/// Team registry entry. `color` is a display hint for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team_name: String,
    pub color: String,
}

/// One stored session-result row before normalization.
///
/// `position` is free text as edited or scraped; rows whose position is not a
/// number ("DNF", "DQ", ...) are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResultRow {
    pub position: String,
    pub driver_name: Option<String>,
    pub team_name: Option<String>,
    pub points: f64,
}

impl RawResultRow {
    /// Position as an unsigned integer, `None` for non-numeric markers.
    pub fn parsed_position(&self) -> Option<u32> {
        self.position.trim().parse().ok()
    }
}

/// Canonical long-form result record produced by the normalizer.
///
/// Position 0 is reserved for bonus/fastest-lap pseudo-entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub country: String,
    pub end_date: NaiveDate,
    pub position: u32,
    pub driver_name: Option<String>,
    pub team_name: Option<String>,
    pub points: f64,
    pub is_sprint: bool,
}

/// Full dataset for one season, as held by the in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct SeasonDataset {
    pub races: Vec<Race>,
    pub drivers: Vec<DriverEntry>,
    pub teams: Vec<TeamEntry>,
    /// Stored session tables keyed by (country, session kind).
    pub results: HashMap<(String, SessionKind), Vec<RawResultRow>>,
}

impl SeasonDataset {
    pub fn session(&self, country: &str, kind: SessionKind) -> Option<&Vec<RawResultRow>> {
        self.results.get(&(country.to_string(), kind))
    }

    pub fn set_session(&mut self, country: &str, kind: SessionKind, rows: Vec<RawResultRow>) {
        self.results.insert((country.to_string(), kind), rows);
    }
}

/// Races sorted chronologically by end date.
///
/// The sort is stable: races sharing an end date keep their declaration
/// order. This ordering is the x-axis for all accumulation.
pub fn order_races(races: &[Race]) -> Vec<Race> {
    let mut ordered = races.to_vec();
    ordered.sort_by_key(|r| r.end_date);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn race(country: &str, end: NaiveDate) -> Race {
        Race {
            country: country.to_string(),
            start_date: end,
            end_date: end,
            has_sprint: false,
        }
    }

    #[test]
    fn test_order_races_chronological() {
        let races = vec![
            race("Japan", date(2024, 4, 7)),
            race("Bahrain", date(2024, 3, 2)),
            race("Australia", date(2024, 3, 24)),
        ];
        let ordered = order_races(&races);
        let countries: Vec<&str> = ordered.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Bahrain", "Australia", "Japan"]);
    }

    #[test]
    fn test_order_races_ties_keep_declaration_order() {
        let shared = date(2024, 6, 1);
        let races = vec![race("First", shared), race("Second", shared)];
        let ordered = order_races(&races);
        assert_eq!(ordered[0].country, "First");
        assert_eq!(ordered[1].country, "Second");
    }

    #[test]
    fn test_parsed_position_numeric() {
        let row = RawResultRow {
            position: " 3 ".to_string(),
            driver_name: None,
            team_name: None,
            points: 15.0,
        };
        assert_eq!(row.parsed_position(), Some(3));
    }

    #[test]
    fn test_parsed_position_non_numeric() {
        let row = RawResultRow {
            position: "DNF".to_string(),
            driver_name: None,
            team_name: None,
            points: 0.0,
        };
        assert_eq!(row.parsed_position(), None);
    }

    #[test]
    fn test_session_kind_display() {
        assert_eq!(SessionKind::Race.to_string(), "race");
        assert_eq!(SessionKind::Sprint.to_string(), "sprint");
    }

    #[test]
    fn test_season_dataset_sessions() {
        let mut dataset = SeasonDataset::default();
        assert!(dataset.session("Bahrain", SessionKind::Race).is_none());

        dataset.set_session(
            "Bahrain",
            SessionKind::Race,
            vec![RawResultRow {
                position: "1".to_string(),
                driver_name: Some("Verstappen".to_string()),
                team_name: None,
                points: 25.0,
            }],
        );
        let stored = dataset.session("Bahrain", SessionKind::Race).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(dataset.session("Bahrain", SessionKind::Sprint).is_none());
    }
}
