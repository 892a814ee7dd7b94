//! Service layer for standings computations.
//!
//! Each service pairs pure `compute`/`accumulate` functions with async `get_*`
//! orchestration over the repository, plus `blocking_get_*` wrappers for
//! presentation code without an async runtime.

pub mod memo;

pub mod normalizer;

pub mod pivot;

pub mod projection;

pub mod standings;

pub mod stats;



pub use normalizer::{build_lookups, get_result_table, normalize_results};
pub use pivot::{entity_by_race, race_by_entity};
pub use projection::{blocking_get_head_to_head, compute_head_to_head, get_head_to_head};
pub use standings::{accumulate, blocking_get_standings, get_standings};
pub use stats::{
    aggregate_points, blocking_get_aggregate_points, get_aggregate_points, get_position_frequency,
    position_frequency,
};
