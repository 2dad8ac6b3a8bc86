//! Injected environment for rule evaluation.
//!
//! The battle rules are pure; the only outside input they take is the random
//! oracle defined here.

pub mod rng;

pub use rng::{FixedRng, PcgRng, RngOracle, Roller, compute_seed};
