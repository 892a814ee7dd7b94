use chrono::NaiveDate;
use proptest::prelude::*;

use df1sh_rust::api::EntityKind;
use df1sh_rust::models::{DriverEntry, Race, RawResultRow, ScoringTable, SessionKind, TeamEntry};
use df1sh_rust::services::normalizer::{normalize_results, ResultTable, SessionTables};
use df1sh_rust::services::projection::compute_head_to_head;
use df1sh_rust::services::standings::accumulate;
use df1sh_rust::services::race_by_entity;

/// Per-race points per driver, plus which leading races are filed.
#[derive(Debug, Clone)]
struct SeasonCase {
    points: Vec<Vec<u32>>, // [race][driver]
    sprints: Vec<bool>,
    filed: usize,
}

fn season_case() -> impl Strategy<Value = SeasonCase> {
    (1usize..5, 2usize..5)
        .prop_flat_map(|(races, drivers)| {
            (
                proptest::collection::vec(
                    proptest::collection::vec(0u32..=25, drivers),
                    races,
                ),
                proptest::collection::vec(any::<bool>(), races),
                0usize..=races,
            )
        })
        .prop_map(|(points, sprints, filed)| SeasonCase {
            points,
            sprints,
            filed,
        })
}

fn build_table(case: &SeasonCase) -> ResultTable {
    let races: Vec<Race> = case
        .points
        .iter()
        .enumerate()
        .map(|(i, _)| Race {
            country: format!("R{}", i),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
                + chrono::Duration::days(7 * i as i64),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
                + chrono::Duration::days(7 * i as i64),
            has_sprint: case.sprints[i],
        })
        .collect();

    let driver_count = case.points[0].len();
    let roster: Vec<DriverEntry> = (0..driver_count)
        .map(|d| DriverEntry {
            driver_name: format!("D{}", d),
            team_name: format!("T{}", d % 2),
        })
        .collect();
    let teams: Vec<TeamEntry> = (0..2)
        .map(|t| TeamEntry {
            team_name: format!("T{}", t),
            color: "#000000".to_string(),
        })
        .collect();

    let mut sessions = SessionTables::new();
    for (i, race_points) in case.points.iter().enumerate().take(case.filed) {
        let rows: Vec<RawResultRow> = race_points
            .iter()
            .enumerate()
            .map(|(d, &points)| RawResultRow {
                position: (d + 1).to_string(),
                driver_name: Some(format!("D{}", d)),
                team_name: None,
                points: points as f64,
            })
            .collect();
        sessions.insert((format!("R{}", i), SessionKind::Race), rows);
    }

    normalize_results(&races, &sessions, &roster, &teams, &ScoringTable::default())
}

proptest! {
    #[test]
    fn prop_cumulative_is_monotone_with_zero_baseline(case in season_case()) {
        let table = build_table(&case);
        let standings = accumulate(&table, EntityKind::Driver);

        for series in &standings.series {
            prop_assert_eq!(series.cumulative[0], 0.0);
            for pair in series.cumulative.windows(2) {
                prop_assert!(pair[1] >= pair[0]);
            }
        }
    }

    #[test]
    fn prop_points_are_conserved_per_race(case in season_case()) {
        let table = build_table(&case);
        let standings = accumulate(&table, EntityKind::Driver);

        for (slot, race) in table.races.iter().enumerate() {
            let recorded: f64 = table
                .records
                .iter()
                .filter(|r| r.country == race.country)
                .map(|r| r.points)
                .sum();
            let accumulated: f64 = standings.series.iter().map(|s| s.per_race[slot + 1]).sum();
            prop_assert!((recorded - accumulated).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_pivot_is_complete(case in season_case()) {
        let table = build_table(&case);
        let standings = accumulate(&table, EntityKind::Driver);
        let pivot = race_by_entity(&standings);

        prop_assert_eq!(pivot.index.len(), standings.race_axis.len());
        for row in &pivot.index {
            for col in &pivot.columns {
                prop_assert!(pivot.get(row, col).is_some());
            }
        }
    }

    #[test]
    fn prop_envelope_is_non_increasing_and_ends_at_zero(case in season_case()) {
        let table = build_table(&case);
        let standings = accumulate(&table, EntityKind::Driver);

        let data = compute_head_to_head(
            &standings,
            "D0",
            "D1",
            table.completed,
            2,
            1,
            &ScoringTable::default(),
        ).unwrap();

        for pair in data.points_remaining.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
        prop_assert_eq!(*data.points_remaining.last().unwrap(), 0.0);
    }

    #[test]
    fn prop_actual_diff_is_nan_past_completed(case in season_case()) {
        let table = build_table(&case);
        let standings = accumulate(&table, EntityKind::Driver);

        let data = compute_head_to_head(
            &standings,
            "D0",
            "D1",
            table.completed,
            3,
            2,
            &ScoringTable::default(),
        ).unwrap();

        prop_assert_eq!(data.actual_diff[0], 0.0);
        for (i, value) in data.actual_diff.iter().enumerate().skip(1) {
            if i <= table.completed {
                prop_assert!(!value.is_nan());
            } else {
                prop_assert!(value.is_nan());
            }
        }
    }
}
