//! Championship scoring constants and the points-per-position table.

use serde::{Deserialize, Serialize};

use super::season::RawResultRow;

/// Points for a race finish, P1 down to P10.
pub const RACE_POINTS: [f64; 10] = [25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0];

/// Points for a sprint finish, P1 down to P8.
pub const SPRINT_POINTS: [f64; 8] = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

/// Bonus for the fastest race lap.
pub const FASTEST_LAP_BONUS: f64 = 1.0;

/// Points-per-position tables, descending from P1.
///
/// Drives the default result templates and the points-remaining envelope.
/// Recorded points are taken at face value and never validated against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub race_points: Vec<f64>,
    pub sprint_points: Vec<f64>,
    pub fastest_lap_bonus: f64,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            race_points: RACE_POINTS.to_vec(),
            sprint_points: SPRINT_POINTS.to_vec(),
            fastest_lap_bonus: FASTEST_LAP_BONUS,
        }
    }
}

impl ScoringTable {
    /// Maximum points one entity can take from a weekend without a sprint.
    pub fn race_weekend_max(&self) -> f64 {
        self.race_points.first().copied().unwrap_or(0.0) + self.fastest_lap_bonus
    }

    /// Maximum points one entity can take from a weekend with a sprint.
    pub fn sprint_weekend_max(&self) -> f64 {
        self.race_weekend_max() + self.sprint_points.first().copied().unwrap_or(0.0)
    }

    /// Placeholder race result: paying positions with no driver assigned.
    pub fn race_template(&self) -> Vec<RawResultRow> {
        Self::template(&self.race_points)
    }

    /// Placeholder sprint result.
    pub fn sprint_template(&self) -> Vec<RawResultRow> {
        Self::template(&self.sprint_points)
    }

    fn template(points: &[f64]) -> Vec<RawResultRow> {
        points
            .iter()
            .enumerate()
            .map(|(i, &points)| RawResultRow {
                position: (i + 1).to_string(),
                driver_name: None,
                team_name: None,
                points,
            })
            .collect()
    }
}
