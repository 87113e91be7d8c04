//! Scenario and rules files.
//!
//! This crate turns data files into `encounter-core` types:
//! - Encounter scenarios (RON): roster, arena, seed
//! - Rules configuration (TOML): any subset of `RulesConfig`
//!
//! Content is consumed when an encounter is built and never appears in
//! encounter state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LoadResult, RulesLoader, ScenarioLoader};
