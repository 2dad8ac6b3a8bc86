//! Stat derivation.
//!
//! - [`attributes`]: base attributes, the effectiveness cycle and rarity tables
//! - [`derived`]: combat statistics and the single recomputation path
//! - [`bounds`]: fixed-point helpers and per-stat clamps

pub mod attributes;
pub mod bounds;
pub mod derived;

pub use attributes::{Attribute, BaseAttributes, Rarity};
pub use bounds::{StatBounds, div_round, div_round_saturating, scale_pct};
pub use derived::{CreatureProfile, DerivedStat, DerivedStats, StatDelta, derive_stats};
