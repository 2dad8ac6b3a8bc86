//! Effect ledger: temporary modifiers attached to a creature.
//!
//! Effects are created by tools, spells, defensive stances and death effects.
//! Their stat deltas stack additively (never merged) into the overlay that
//! [`crate::stats::derive_stats`] folds into the creature's stats.
//!
//! # Lifecycle
//!
//! ```text
//! attach ─► [Countdown] ─ tick at owner's end of turn ─► duration 0 ─► removed
//! attach ─► [TurnStart] ─ owner's next turn begins ──────────────────► removed
//! ```

pub mod death;
mod ledger;

pub use ledger::{TickScaling, attach, clear_defending, overlay, tick};
pub(crate) use ledger::attach_in_place;

use crate::stats::StatDelta;

/// Broad category of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Buff,
    Debuff,
    /// Damage over time.
    Dot,
    /// Heal over time.
    Hot,
    /// Stores power released into the next attack.
    Charge,
}

/// Strength band of an item effect, derived from its power percentage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PowerLevel {
    Weak,
    #[default]
    Normal,
    Strong,
    Maximum,
}

impl PowerLevel {
    pub const fn from_power_pct(pct: i64) -> Self {
        if pct >= 140 {
            Self::Maximum
        } else if pct >= 120 {
            Self::Strong
        } else if pct >= 100 {
            Self::Normal
        } else {
            Self::Weak
        }
    }
}

/// When an effect leaves the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expiry {
    /// Decremented once per owning-side end of turn, removed at 0.
    #[default]
    Countdown,
    /// Removed when the owner's side next begins its turn.
    TurnStart,
}

/// Accumulation state of a charge effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeProgress {
    pub per_tick: i32,
    pub accumulated: i32,
    pub ticks: u32,
    pub ticks_required: u32,
    pub final_burst: i32,
}

impl ChargeProgress {
    pub const fn new(per_tick: i32, ticks_required: u32, final_burst: i32) -> Self {
        Self {
            per_tick,
            accumulated: 0,
            ticks: 0,
            ticks_required,
            final_burst,
        }
    }
}

/// One entry of a creature's effect ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    /// Assigned by [`attach`] from the creature's effect sequence.
    pub id: u32,
    pub name: String,
    pub kind: EffectKind,
    pub remaining_duration: u32,
    pub stat_delta: StatDelta,
    pub health_delta_per_tick: i32,
    pub power_level: PowerLevel,
    pub expiry: Expiry,
    pub charge: Option<ChargeProgress>,
}

impl ActiveEffect {
    /// Countdown effect with no deltas. Duration is raised to at least 1.
    pub fn new(name: impl Into<String>, kind: EffectKind, duration: u32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            kind,
            remaining_duration: duration.max(1),
            stat_delta: StatDelta::new(),
            health_delta_per_tick: 0,
            power_level: PowerLevel::Normal,
            expiry: Expiry::Countdown,
            charge: None,
        }
    }

    #[must_use]
    pub fn with_delta(mut self, delta: StatDelta) -> Self {
        self.stat_delta = delta;
        self
    }

    #[must_use]
    pub fn with_health_per_tick(mut self, amount: i32) -> Self {
        self.health_delta_per_tick = amount;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power_level: PowerLevel) -> Self {
        self.power_level = power_level;
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = expiry;
        self
    }

    /// Turns the effect into a charge. Charges never carry a stat delta.
    #[must_use]
    pub fn with_charge(mut self, charge: ChargeProgress) -> Self {
        self.kind = EffectKind::Charge;
        self.stat_delta = StatDelta::new();
        self.charge = Some(charge);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_level_bands() {
        assert_eq!(PowerLevel::from_power_pct(90), PowerLevel::Weak);
        assert_eq!(PowerLevel::from_power_pct(100), PowerLevel::Normal);
        assert_eq!(PowerLevel::from_power_pct(132), PowerLevel::Strong);
        assert_eq!(PowerLevel::from_power_pct(210), PowerLevel::Maximum);
    }

    #[test]
    fn charge_drops_stat_delta() {
        use crate::stats::DerivedStat;

        let effect = ActiveEffect::new("Charge", EffectKind::Buff, 0)
            .with_delta(StatDelta::new().with(DerivedStat::PhysicalAttack, 4))
            .with_charge(ChargeProgress::new(5, 4, 20));
        assert_eq!(effect.kind, EffectKind::Charge);
        assert!(effect.stat_delta.is_empty());
        assert_eq!(effect.remaining_duration, 1);
    }
}
