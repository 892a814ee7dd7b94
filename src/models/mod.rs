//! Domain models shared across the core.

pub mod scoring;
pub mod season;

pub use scoring::ScoringTable;
pub use season::{
    order_races, DriverEntry, Race, RawResultRow, ResultRecord, SeasonDataset, SessionKind,
    TeamEntry,
};
