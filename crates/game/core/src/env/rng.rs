//! Deterministic random number generation.
//!
//! Rolls never touch a stateful generator. Each one hashes the encounter seed,
//! the action nonce, the acting combatant and a per-roll context into a fresh
//! seed, so replaying the same actions yields the same dice.

use crate::state::CombatantId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive). A zero-sided die rolls 1.
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides.max(1)) + 1
    }

    /// Roll a d20.
    fn roll_d20(&self, seed: u64) -> u32 {
        self.roll_die(seed, 20)
    }
}

/// PCG-XSH-RR: 32-bit output from 64-bit state, one step per seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Derives the seed for a single roll.
///
/// * `encounter_seed` - seed fixed when the encounter is built
/// * `nonce` - action sequence number, bumped by every executed action and
///   every initiative roll
/// * `actor_id` - combatant the roll belongs to
/// * `context` - distinguishes rolls within one action (0 = primary roll,
///   1.. = damage dice, [`Roller::GENERATION_CONTEXT`].. = roster generation)
pub fn compute_seed(encounter_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = encounter_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix-style avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequential roll source for one action.
///
/// Every call consumes the next context value, so a single action can roll
/// any number of dice without two rolls sharing a seed.
pub struct Roller<'a> {
    rng: &'a dyn RngOracle,
    encounter_seed: u64,
    nonce: u64,
    actor: u32,
    context: u32,
}

impl<'a> Roller<'a> {
    /// First context used when rolling up a roster before the encounter starts.
    pub const GENERATION_CONTEXT: u32 = 1 << 16;

    pub fn new(
        rng: &'a dyn RngOracle,
        encounter_seed: u64,
        nonce: u64,
        actor: CombatantId,
    ) -> Self {
        Self {
            rng,
            encounter_seed,
            nonce,
            actor: actor.0,
            context: 0,
        }
    }

    /// Jumps to a fixed context, e.g. [`Self::GENERATION_CONTEXT`].
    pub fn with_context(mut self, context: u32) -> Self {
        self.context = context;
        self
    }

    pub fn roll_die(&mut self, sides: u32) -> u32 {
        let seed = compute_seed(self.encounter_seed, self.nonce, self.actor, self.context);
        self.context = self.context.wrapping_add(1);
        self.rng.roll_die(seed, sides)
    }

    pub fn d20(&mut self) -> u32 {
        self.roll_die(20)
    }
}
