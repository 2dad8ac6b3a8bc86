//! Seedable random source for combat and planning rolls.
//!
//! Every roll is a pure function of `(battle seed, action nonce, actor,
//! context)`. Replaying the same action against the same state with the same
//! oracle always yields the same outcome, which keeps battles replayable and
//! lets tests script dice with [`FixedRng`].

/// Deterministic random oracle.
///
/// Implementations map a seed to a value without internal state, so the
/// same oracle can be shared freely between the engine and the planner.
pub trait RngOracle {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// PCG-XSH-RR generator: one LCG step followed by an xorshift/rotate output
/// permutation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Oracle that returns the same raw value for every seed.
///
/// With `FixedRng(20)`: every d100 rolls 21, so 0% chances never trigger, and
/// the 80..=120 damage variance lands on exactly 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl FixedRng {
    /// Neutral dice: no dodge or crit below 21%, variance ×1.0.
    pub const NEUTRAL: Self = Self(20);
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Roll contexts distinguishing independent rolls made for one action.
pub mod context {
    pub const DODGE: u32 = 0;
    pub const CRITICAL: u32 = 1;
    pub const VARIANCE: u32 = 2;
    pub const TRAUMA: u32 = 3;
    pub const WEAKNESS: u32 = 4;
    pub const SPELL_CRITICAL: u32 = 5;
    pub const PLAN_MULTI_ACTION: u32 = 16;
    pub const PLAN_AGGRESSION: u32 = 17;
    /// Base for per-step planner rolls (`PLAN_STEP + 2 × step index`, plus one for the blunder pick).
    pub const PLAN_STEP: u32 = 32;
}

/// Mix the battle seed, nonce, actor and roll context into one seed.
///
/// # Arguments
///
/// * `game_seed` - Seed fixed at battle start
/// * `nonce` - Count of accepted actions so far
/// * `actor_id` - Creature (or planner) performing the roll
/// * `context` - Roll discriminator, see [`context`]
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Roll helper bound to one action.
///
/// Combat code asks a `Roller` for chances and ranges and never touches seeds
/// directly.
#[derive(Clone, Copy)]
pub struct Roller<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
}

impl<'a> Roller<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
        }
    }

    fn seed(&self, actor: u32, context: u32) -> u64 {
        compute_seed(self.game_seed, self.nonce, actor, context)
    }

    /// True with probability `percent`% (0 never, 100 always).
    pub fn chance(&self, actor: u32, context: u32, percent: u32) -> bool {
        self.rng.roll_d100(self.seed(actor, context)) <= percent
    }

    /// Uniform value in `[min, max]`.
    pub fn range(&self, actor: u32, context: u32, min: u32, max: u32) -> u32 {
        self.rng.range(self.seed(actor, context), min, max)
    }

    /// Uniform index in `0..len` (0 when `len` is 0).
    pub fn pick(&self, actor: u32, context: u32, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.rng.next_u32(self.seed(actor, context)) as usize) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn seeds_differ_by_context() {
        let a = compute_seed(7, 3, 1, context::DODGE);
        let b = compute_seed(7, 3, 1, context::CRITICAL);
        let c = compute_seed(7, 4, 1, context::DODGE);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn neutral_fixed_rng_never_triggers_zero_chance() {
        let roller = Roller::new(&FixedRng::NEUTRAL, 0, 0);
        assert!(!roller.chance(1, context::DODGE, 0));
        assert!(roller.chance(1, context::DODGE, 100));
        assert_eq!(roller.range(1, context::VARIANCE, 80, 120), 100);
    }

    #[test]
    fn pcg_rolls_stay_in_range() {
        let rng = PcgRng;
        for seed in 0..500 {
            let roll = rng.roll_d100(seed);
            assert!((1..=100).contains(&roll));
            let v = rng.range(seed, 80, 120);
            assert!((80..=120).contains(&v));
        }
    }
}
