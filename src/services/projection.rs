//! Head-to-head trend projection.
//!
//! Computes the running points gap between two entities, fits a linear model
//! to a trailing window of that gap, and extrapolates it over the remaining
//! races together with the maximum-points-remaining envelope. The rendering
//! layer overlays the three sequences to answer "can the chaser still catch
//! up".

use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::api::{EntityKind, SeasonId};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, SeasonRepository};
use crate::models::ScoringTable;

use super::normalizer;
use super::standings::{self, StandingsTable};

/// Fitted linear trend over the trailing diff window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of diff points the fit was trained on. A window below two
    /// points means a degenerate flat fit.
    pub window: usize,
}

/// Three aligned sequences over the full race axis (baseline slot first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadData {
    pub first: String,
    pub second: String,
    /// Axis labels: baseline slot followed by every configured race.
    pub race_axis: Vec<String>,
    /// Observed cumulative gap `first - second`; NaN past the last completed
    /// race.
    pub actual_diff: Vec<f64>,
    /// Fitted/extrapolated gap, evaluated over the whole index range up to
    /// `completed + next_n` races; NaN beyond the season boundary and on the
    /// baseline slot.
    pub predicted_diff: Vec<f64>,
    /// Maximum points one entity can still take after each slot; monotone
    /// non-increasing, 0 once the season is over.
    pub points_remaining: Vec<f64>,
    /// Number of completed races the diff was computed over.
    pub completed: usize,
    pub fit: TrendFit,
}

/// Least-squares fit over the trailing `last_n` points of `diff`.
///
/// The x feature is the absolute race index, so the fit can be evaluated
/// anywhere on the axis. Windows smaller than two points (including
/// `last_n == 0`) degrade to a flat line at the last observed gap; the fit
/// never errors.
fn fit_trailing_window(diff: &[f64], last_n: usize) -> TrendFit {
    let k = diff.len();
    let window = last_n.min(k);

    let flat = TrendFit {
        slope: 0.0,
        intercept: diff.last().copied().unwrap_or(0.0),
        window,
    };
    if window < 2 {
        return flat;
    }

    let start = k - window;
    let xs: Vec<f64> = (start..k).map(|i| i as f64).collect();
    let ys = diff[start..].to_vec();

    let records = match Array2::from_shape_vec((window, 1), xs) {
        Ok(records) => records,
        Err(_) => return flat,
    };
    let dataset = Dataset::new(records, Array1::from_vec(ys));
    match LinearRegression::new().fit(&dataset) {
        Ok(model) => TrendFit {
            slope: model.params()[0],
            intercept: model.intercept(),
            window,
        },
        Err(_) => flat,
    }
}

/// Project the head-to-head gap between `first` and `second`.
///
/// * `completed` — number of leading races with real results (clamped to the
///   axis length).
/// * `last_n` — trailing window for the fit, clamped to `completed`.
/// * `next_n` — forward horizon; predictions past the season boundary are
///   truncated to NaN, never extrapolated.
pub fn compute_head_to_head(
    standings: &StandingsTable,
    first: &str,
    second: &str,
    completed: usize,
    last_n: usize,
    next_n: usize,
    scoring: &ScoringTable,
) -> RepositoryResult<HeadToHeadData> {
    let lookup = |name: &str| {
        standings.entity(name).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("entity '{}' is not in the standings", name),
                ErrorContext::new("compute_head_to_head")
                    .with_entity("entity")
                    .with_entity_id(name),
            )
        })
    };
    let series_a = lookup(first)?;
    let series_b = lookup(second)?;

    let n = standings.race_count();
    let k = completed.min(n);

    // gap over completed races, indexed 0..k-1 (axis slot i+1)
    let diff: Vec<f64> = (0..k)
        .map(|i| series_a.cumulative[i + 1] - series_b.cumulative[i + 1])
        .collect();

    let fit = fit_trailing_window(&diff, last_n);

    let mut actual_diff = Vec::with_capacity(n + 1);
    actual_diff.push(0.0);
    for i in 0..n {
        actual_diff.push(if i < k { diff[i] } else { f64::NAN });
    }

    // evaluate the fit over the entire index range, not just the training
    // window; see DESIGN.md for why the backfilled curve is kept
    let mut predicted_diff = vec![f64::NAN; n + 1];
    let horizon = k + next_n;
    if n > 0 && horizon > 0 {
        let last_idx = (horizon - 1).min(n - 1);
        for idx in 0..=last_idx {
            predicted_diff[idx + 1] = fit.slope * idx as f64 + fit.intercept;
        }
    }

    // reverse cumulative sum of per-race maxima; slot i = points still on
    // the table after race i, with 0 once the season is over
    let mut points_remaining = vec![0.0; n + 1];
    for (i, slot) in standings.race_axis.iter().skip(1).enumerate().rev() {
        let race_max = if slot.has_sprint {
            scoring.sprint_weekend_max()
        } else {
            scoring.race_weekend_max()
        };
        points_remaining[i] = points_remaining[i + 1] + race_max;
    }

    Ok(HeadToHeadData {
        first: first.to_string(),
        second: second.to_string(),
        race_axis: standings.race_axis.iter().map(|s| s.label.clone()).collect(),
        actual_diff,
        predicted_diff,
        points_remaining,
        completed: k,
        fit,
    })
}

/// Fetch, normalize, and project a head-to-head for one season.
#[allow(clippy::too_many_arguments)]
pub async fn get_head_to_head(
    repo: &dyn SeasonRepository,
    season: &SeasonId,
    kind: EntityKind,
    first: &str,
    second: &str,
    last_n: usize,
    next_n: usize,
    scoring: &ScoringTable,
) -> RepositoryResult<HeadToHeadData> {
    let table = normalizer::get_result_table(repo, season, scoring).await?;
    let standings = standings::accumulate(&table, kind);
    compute_head_to_head(
        &standings,
        first,
        second,
        table.completed,
        last_n,
        next_n,
        scoring,
    )
}

/// Synchronous wrapper over [`get_head_to_head`] using the global repository.
#[allow(clippy::too_many_arguments)]
pub fn blocking_get_head_to_head(
    season: &SeasonId,
    kind: EntityKind,
    first: &str,
    second: &str,
    last_n: usize,
    next_n: usize,
    scoring: &ScoringTable,
) -> RepositoryResult<HeadToHeadData> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| RepositoryError::internal(format!("failed to create async runtime: {}", e)))?;
    let repo = crate::db::get_repository()
        .map_err(|e| RepositoryError::configuration(e.to_string()))?;
    runtime.block_on(get_head_to_head(
        repo.as_ref(),
        season,
        kind,
        first,
        second,
        last_n,
        next_n,
        scoring,
    ))
}
