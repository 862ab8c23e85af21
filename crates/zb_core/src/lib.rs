//! # zb_core - Deterministic Zone-Bag Football Match Simulation Engine
//!
//! Simulates an association-football match by discretizing the pitch into a
//! 6×5 zone grid and resolving possession as weighted random draws from
//! zone- and context-specific token bags.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same event log)
//! - Per-player fatigue, staff bonuses, defensive pressure
//! - Parallel batch simulation of a whole league day
//! - JSON API for easy host integration

// Game engine APIs often require many parameters for state, rosters, etc.
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

// Re-export the main API surface
pub use api::{simulate_batch_json, simulate_match_json, SCHEMA_VERSION};
pub use batch::simulate_batch;
pub use config::{SimConfig, DEFAULT_CONFIG};
pub use engine::{simulate_match, MatchEngine, MatchPlan};
pub use error::{ConfigError, Result, SimError};
pub use models::{Fixture, FixtureReport, MatchResult, TeamSheet};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
