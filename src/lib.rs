//! # DF1sh Rust Core
//!
//! Season standings engine for an F1 points dashboard.
//!
//! This crate ingests per-race result tables, accumulates cumulative points
//! per driver or team across an ordered season, reshapes the series into
//! pivot views for charts and heatmaps, and fits a linear trend to forecast
//! the head-to-head points gap over the remaining races. The rendering layer
//! (tables, charts, editors) lives elsewhere and consumes the structured
//! outputs of this crate; file storage and result fetching sit behind the
//! repository trait.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes, selector enums, and DTO re-exports
//! - [`models`]: domain records, registries, and the scoring table
//! - [`db`]: repository pattern over season storage, config, checksums
//! - [`services`]: normalization, accumulation, pivots, projection, stats
//!
//! Computations are pure functions of their inputs; the async `get_*`
//! functions only orchestrate repository reads around them. Optional
//! memoization ([`services::memo`]) keys on a content hash of every
//! effective input.

pub mod api;

pub mod db;
pub mod models;

pub mod services;
