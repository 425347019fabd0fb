//! robolearn-core — Quiz catalog, module runner, and scoring.
//!
//! This crate defines the data model, the per-section module runner state
//! machine, the session orchestrator and the score aggregation that the
//! robolearn CLI and report renderers build on.

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod runner;
pub mod scores;
pub mod session;
pub mod summary;
