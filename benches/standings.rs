use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use df1sh_rust::api::EntityKind;
use df1sh_rust::models::{DriverEntry, Race, RawResultRow, ScoringTable, SessionKind, TeamEntry};
use df1sh_rust::services::normalizer::{normalize_results, ResultTable, SessionTables};
use df1sh_rust::services::projection::compute_head_to_head;
use df1sh_rust::services::standings::accumulate;
use df1sh_rust::services::{entity_by_race, race_by_entity};
use df1sh_rust::services::pivot::PivotValue;

const RACES: usize = 24;
const DRIVERS: usize = 20;

/// Full synthetic season: 24 races (every third with a sprint), 20 drivers.
fn synthetic_season() -> (Vec<Race>, SessionTables, Vec<DriverEntry>, Vec<TeamEntry>) {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let races: Vec<Race> = (0..RACES)
        .map(|i| Race {
            country: format!("Race{:02}", i),
            start_date: start + chrono::Duration::days(14 * i as i64),
            end_date: start + chrono::Duration::days(14 * i as i64 + 2),
            has_sprint: i % 3 == 0,
        })
        .collect();

    let roster: Vec<DriverEntry> = (0..DRIVERS)
        .map(|d| DriverEntry {
            driver_name: format!("Driver{:02}", d),
            team_name: format!("Team{:02}", d / 2),
        })
        .collect();
    let teams: Vec<TeamEntry> = (0..DRIVERS / 2)
        .map(|t| TeamEntry {
            team_name: format!("Team{:02}", t),
            color: "#123456".to_string(),
        })
        .collect();

    let scoring = ScoringTable::default();
    let mut sessions = SessionTables::new();
    for (i, race) in races.iter().enumerate() {
        let rows: Vec<RawResultRow> = (0..DRIVERS)
            .map(|d| {
                // rotate the grid so every driver scores over the season
                let position = (d + i) % DRIVERS;
                RawResultRow {
                    position: (position + 1).to_string(),
                    driver_name: Some(format!("Driver{:02}", d)),
                    team_name: None,
                    points: scoring.race_points.get(position).copied().unwrap_or(0.0),
                }
            })
            .collect();
        sessions.insert((race.country.clone(), SessionKind::Race), rows);
        if race.has_sprint {
            let sprint_rows: Vec<RawResultRow> = (0..DRIVERS)
                .map(|d| {
                    let position = (d + i + 5) % DRIVERS;
                    RawResultRow {
                        position: (position + 1).to_string(),
                        driver_name: Some(format!("Driver{:02}", d)),
                        team_name: None,
                        points: scoring.sprint_points.get(position).copied().unwrap_or(0.0),
                    }
                })
                .collect();
            sessions.insert((race.country.clone(), SessionKind::Sprint), sprint_rows);
        }
    }

    (races, sessions, roster, teams)
}

fn normalized_table() -> ResultTable {
    let (races, sessions, roster, teams) = synthetic_season();
    normalize_results(&races, &sessions, &roster, &teams, &ScoringTable::default())
}

fn bench_normalize(c: &mut Criterion) {
    let (races, sessions, roster, teams) = synthetic_season();
    let scoring = ScoringTable::default();

    c.bench_function("normalize_full_season", |b| {
        b.iter(|| {
            black_box(normalize_results(
                black_box(&races),
                black_box(&sessions),
                &roster,
                &teams,
                &scoring,
            ))
        })
    });
}

fn bench_accumulate(c: &mut Criterion) {
    let table = normalized_table();
    let mut group = c.benchmark_group("accumulate");

    group.bench_function("drivers", |b| {
        b.iter(|| black_box(accumulate(black_box(&table), EntityKind::Driver)))
    });
    group.bench_function("teams", |b| {
        b.iter(|| black_box(accumulate(black_box(&table), EntityKind::Team)))
    });
    group.finish();
}

fn bench_pivots(c: &mut Criterion) {
    let table = normalized_table();
    let standings = accumulate(&table, EntityKind::Driver);
    let order: Vec<String> = standings.series.iter().map(|s| s.name.clone()).collect();
    let mut group = c.benchmark_group("pivot");

    group.bench_function("race_by_entity", |b| {
        b.iter(|| black_box(race_by_entity(black_box(&standings))))
    });
    group.bench_function("entity_by_race", |b| {
        b.iter(|| {
            black_box(entity_by_race(
                black_box(&standings),
                PivotValue::PerRace,
                &order,
            ))
        })
    });
    group.finish();
}

fn bench_head_to_head(c: &mut Criterion) {
    let table = normalized_table();
    let standings = accumulate(&table, EntityKind::Driver);
    let scoring = ScoringTable::default();

    c.bench_function("head_to_head_projection", |b| {
        b.iter(|| {
            black_box(
                compute_head_to_head(
                    black_box(&standings),
                    "Driver00",
                    "Driver01",
                    table.completed,
                    6,
                    4,
                    &scoring,
                )
                .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_accumulate,
    bench_pivots,
    bench_head_to_head
);
criterion_main!(benches);
