//! Long/wide reshaping of standings data.
//!
//! The race axis is never re-sorted here: rows and columns come out in the
//! chronological order the accumulator fixed. Absent entity/race combinations
//! are materialized as 0, never omitted.

use serde::{Deserialize, Serialize};

use super::standings::StandingsTable;

/// Generic wide table: `values[row][column]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Cell lookup by labels, mostly for tests and ad hoc inspection.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.index.iter().position(|i| i == row)?;
        let c = self.columns.iter().position(|c| c == column)?;
        Some(self.values[r][c])
    }
}

/// Which value an entity × race matrix carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotValue {
    Cumulative,
    PerRace,
}

/// Wide table keyed by race (row) × entity (column), values = cumulative
/// points. Rows keep the axis order, baseline slot first.
pub fn race_by_entity(table: &StandingsTable) -> PivotTable {
    let index: Vec<String> = table.race_axis.iter().map(|s| s.label.clone()).collect();
    let columns: Vec<String> = table.series.iter().map(|s| s.name.clone()).collect();
    let values = (0..table.race_axis.len())
        .map(|slot| table.series.iter().map(|s| s.cumulative[slot]).collect())
        .collect();
    PivotTable {
        index,
        columns,
        values,
    }
}

/// Entity (row) × race (column) matrix of cumulative or per-race totals.
///
/// Rows are reindexed to `display_order` (e.g. total points descending);
/// entities missing from the standings become zero rows. Columns are the
/// real races in chronological order; the baseline slot is not a race and
/// does not appear.
pub fn entity_by_race(
    table: &StandingsTable,
    value: PivotValue,
    display_order: &[String],
) -> PivotTable {
    let columns: Vec<String> = table
        .race_axis
        .iter()
        .skip(1)
        .map(|s| s.label.clone())
        .collect();
    let values = display_order
        .iter()
        .map(|entity| match table.entity(entity) {
            Some(series) => {
                let source = match value {
                    PivotValue::Cumulative => &series.cumulative,
                    PivotValue::PerRace => &series.per_race,
                };
                source.iter().skip(1).copied().collect()
            }
            None => vec![0.0; columns.len()],
        })
        .collect();
    PivotTable {
        index: display_order.to_vec(),
        columns,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EntityKind;
    use crate::services::standings::{EntitySeries, RaceSlot, BASELINE_LABEL};
    use chrono::NaiveDate;

    fn slot(label: &str, day: u32) -> RaceSlot {
        RaceSlot {
            label: label.to_string(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            has_sprint: false,
        }
    }

    fn sample_table() -> StandingsTable {
        StandingsTable {
            entity_kind: EntityKind::Driver,
            race_axis: vec![slot(BASELINE_LABEL, 1), slot("Bahrain", 2), slot("Jeddah", 9)],
            series: vec![
                EntitySeries {
                    name: "Leclerc".to_string(),
                    team: Some("Ferrari".to_string()),
                    cumulative: vec![0.0, 25.0, 25.0],
                    per_race: vec![0.0, 25.0, 0.0],
                },
                EntitySeries {
                    name: "Norris".to_string(),
                    team: Some("McLaren".to_string()),
                    cumulative: vec![0.0, 18.0, 43.0],
                    per_race: vec![0.0, 18.0, 25.0],
                },
            ],
        }
    }

    #[test]
    fn test_race_by_entity_keeps_axis_order() {
        let pivot = race_by_entity(&sample_table());
        assert_eq!(pivot.index, vec![BASELINE_LABEL, "Bahrain", "Jeddah"]);
        assert_eq!(pivot.columns, vec!["Leclerc", "Norris"]);
        assert_eq!(pivot.get(BASELINE_LABEL, "Leclerc"), Some(0.0));
        assert_eq!(pivot.get("Jeddah", "Norris"), Some(43.0));
    }

    #[test]
    fn test_entity_by_race_reindexes_rows() {
        let order = vec!["Norris".to_string(), "Leclerc".to_string()];
        let pivot = entity_by_race(&sample_table(), PivotValue::Cumulative, &order);
        assert_eq!(pivot.index, order);
        assert_eq!(pivot.columns, vec!["Bahrain", "Jeddah"]);
        assert_eq!(pivot.values[0], vec![18.0, 43.0]);
        assert_eq!(pivot.values[1], vec![25.0, 25.0]);
    }

    #[test]
    fn test_entity_by_race_per_race_values() {
        let order = vec!["Leclerc".to_string()];
        let pivot = entity_by_race(&sample_table(), PivotValue::PerRace, &order);
        assert_eq!(pivot.values[0], vec![25.0, 0.0]);
    }

    #[test]
    fn test_unknown_entity_becomes_zero_row() {
        let order = vec!["Nobody".to_string(), "Leclerc".to_string()];
        let pivot = entity_by_race(&sample_table(), PivotValue::Cumulative, &order);
        assert_eq!(pivot.values[0], vec![0.0, 0.0]);
        assert_eq!(pivot.get("Nobody", "Bahrain"), Some(0.0));
    }

    #[test]
    fn test_pivot_completeness() {
        let pivot = race_by_entity(&sample_table());
        for row in &pivot.index {
            for col in &pivot.columns {
                assert!(pivot.get(row, col).is_some());
            }
        }
    }
}
