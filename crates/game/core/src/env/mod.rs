//! Read-only collaborators handed to the engine for each call.
//!
//! [`EncounterEnv`] bundles the RNG oracle with the rules configuration so the
//! engine never owns either and tests can swap in their own.
mod rng;

pub use rng::{PcgRng, RngOracle, Roller, compute_seed};

use crate::config::RulesConfig;

/// Everything the engine reads but never mutates.
#[derive(Clone, Copy)]
pub struct EncounterEnv<'a> {
    rng: &'a dyn RngOracle,
    rules: &'a RulesConfig,
}

impl<'a> EncounterEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, rules: &'a RulesConfig) -> Self {
        Self { rng, rules }
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.rules
    }
}

impl core::fmt::Debug for EncounterEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncounterEnv")
            .field("rules", self.rules)
            .finish_non_exhaustive()
    }
}
