//! # Battle Stats
//!
//! A game battle-statistics tracker.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (battle events, roster, player records)
//! - **ingest**: Battle log parsing and per-player tally building
//! - **calculate**: Scoring, rank classification, faction roll-ups
//! - **storage**: Filesystem JSONL storage
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;
