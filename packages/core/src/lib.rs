//! Holiday resolution engine: answers holiday, work-day and free-day-streak
//! questions per country, backed by a local store with a remote provider
//! as fallback.
//!
//! The binary in `src/main.rs` wires these modules into an HTTP service;
//! integration tests in `tests/` build the same router.

pub mod api;
pub mod db;
pub mod error;
pub mod holidays;
pub mod metrics;
pub mod repository;
pub mod services;
pub mod store;

// Binary-only wiring.
pub mod cli;
pub mod config;
pub mod logging;
