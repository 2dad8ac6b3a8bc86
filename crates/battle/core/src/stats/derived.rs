//! Derived combat statistics.
//!
//! Combat stats are a pure function of a creature's profile (attributes,
//! specialties, form, combination level, rarity) plus two additive layers:
//! permanent modifications and the overlay of active effects. They are
//! recomputed through [`derive_stats`] after every change, never patched in
//! place.
//!
//! # Formula
//!
//! ```text
//! weighted = floor + primary × weight × specialty + secondary × weight
//! scaled   = weighted × form × combination × rarity   (per-stat subset)
//! final    = clamp(round(scaled) + permanent + overlay, bounds)
//! ```

use arrayvec::ArrayVec;

use super::attributes::{Attribute, BaseAttributes, Rarity};
use super::bounds::{StatBounds, div_round, div_round_saturating};
use crate::config::BattleConfig;

/// Names one derived statistic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DerivedStat {
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    MaxHealth,
    Initiative,
    CriticalChance,
    DodgeChance,
    EnergyCost,
}

impl DerivedStat {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::PhysicalAttack,
        Self::MagicalAttack,
        Self::PhysicalDefense,
        Self::MagicalDefense,
        Self::MaxHealth,
        Self::Initiative,
        Self::CriticalChance,
        Self::DodgeChance,
        Self::EnergyCost,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name used in battle log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PhysicalAttack => "physical attack",
            Self::MagicalAttack => "magical attack",
            Self::PhysicalDefense => "physical defense",
            Self::MagicalDefense => "magical defense",
            Self::MaxHealth => "max health",
            Self::Initiative => "initiative",
            Self::CriticalChance => "critical chance",
            Self::DodgeChance => "dodge chance",
            Self::EnergyCost => "energy cost",
        }
    }

    pub const fn bounds(self) -> StatBounds {
        match self {
            Self::PhysicalAttack
            | Self::MagicalAttack
            | Self::PhysicalDefense
            | Self::MagicalDefense => StatBounds::COMBAT,
            Self::MaxHealth => StatBounds::HEALTH,
            Self::Initiative => StatBounds::INITIATIVE,
            Self::CriticalChance => StatBounds::CRITICAL,
            Self::DodgeChance => StatBounds::DODGE,
            Self::EnergyCost => StatBounds::ENERGY_COST,
        }
    }
}

/// Additive stat changes indexed by [`DerivedStat`]. Zero means absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    values: [i32; DerivedStat::COUNT],
}

impl StatDelta {
    pub const fn new() -> Self {
        Self {
            values: [0; DerivedStat::COUNT],
        }
    }

    pub const fn get(&self, stat: DerivedStat) -> i32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: DerivedStat, value: i32) {
        self.values[stat.index()] = value;
    }

    /// Builder form of [`StatDelta::set`] that adds to the current value.
    #[must_use]
    pub fn with(mut self, stat: DerivedStat, value: i32) -> Self {
        self.values[stat.index()] += value;
        self
    }

    pub fn add(&mut self, other: &StatDelta) {
        for (mine, theirs) in self.values.iter_mut().zip(other.values.iter()) {
            *mine += theirs;
        }
    }

    /// Every entry multiplied by `pct`/100, rounded half away from zero.
    #[must_use]
    pub fn scaled(&self, pct: i64) -> Self {
        let mut out = *self;
        for value in out.values.iter_mut() {
            *value = div_round(*value as i64 * pct, 100) as i32;
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Non-zero entries in [`DerivedStat::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (DerivedStat, i32)> + '_ {
        DerivedStat::ALL
            .iter()
            .map(|stat| (*stat, self.get(*stat)))
            .filter(|(_, value)| *value != 0)
    }
}

/// Final combat statistics of a creature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub physical_attack: i32,
    pub magical_attack: i32,
    pub physical_defense: i32,
    pub magical_defense: i32,
    pub max_health: i32,
    pub initiative: i32,
    /// Percent chance to land a critical hit.
    pub critical_chance: i32,
    /// Percent chance to dodge an incoming attack.
    pub dodge_chance: i32,
    /// Energy needed to deploy the creature.
    pub energy_cost: i32,
}

impl DerivedStats {
    /// Stats used when a creature carries no base attributes.
    pub const FALLBACK: Self = Self {
        physical_attack: 15,
        magical_attack: 15,
        physical_defense: 8,
        magical_defense: 8,
        max_health: 80,
        initiative: 12,
        critical_chance: 8,
        dodge_chance: 5,
        energy_cost: 3,
    };

    pub const fn get(&self, stat: DerivedStat) -> i32 {
        match stat {
            DerivedStat::PhysicalAttack => self.physical_attack,
            DerivedStat::MagicalAttack => self.magical_attack,
            DerivedStat::PhysicalDefense => self.physical_defense,
            DerivedStat::MagicalDefense => self.magical_defense,
            DerivedStat::MaxHealth => self.max_health,
            DerivedStat::Initiative => self.initiative,
            DerivedStat::CriticalChance => self.critical_chance,
            DerivedStat::DodgeChance => self.dodge_chance,
            DerivedStat::EnergyCost => self.energy_cost,
        }
    }

    pub fn set(&mut self, stat: DerivedStat, value: i32) {
        let slot = match stat {
            DerivedStat::PhysicalAttack => &mut self.physical_attack,
            DerivedStat::MagicalAttack => &mut self.magical_attack,
            DerivedStat::PhysicalDefense => &mut self.physical_defense,
            DerivedStat::MagicalDefense => &mut self.magical_defense,
            DerivedStat::MaxHealth => &mut self.max_health,
            DerivedStat::Initiative => &mut self.initiative,
            DerivedStat::CriticalChance => &mut self.critical_chance,
            DerivedStat::DodgeChance => &mut self.dodge_chance,
            DerivedStat::EnergyCost => &mut self.energy_cost,
        };
        *slot = value;
    }

    /// Sum of the four attack/defense values.
    pub const fn combat_total(&self) -> i32 {
        self.physical_attack + self.magical_attack + self.physical_defense + self.magical_defense
    }

    pub const fn max_attack(&self) -> i32 {
        if self.physical_attack >= self.magical_attack {
            self.physical_attack
        } else {
            self.magical_attack
        }
    }
}

/// Everything derivation reads about a creature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureProfile {
    pub rarity: Rarity,
    /// Evolution form, 0..=3.
    pub form: u8,
    /// Zero to two distinct specialty attributes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub specialties: ArrayVec<Attribute, { BattleConfig::MAX_SPECIALTIES }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combination_level: u32,
    /// `None` when the creature was delivered without base stats.
    pub attributes: Option<BaseAttributes>,
}

impl CreatureProfile {
    pub fn is_specialist(&self, attribute: Attribute) -> bool {
        self.specialties.contains(&attribute)
    }

    /// Multiplier (percent) applied to a primary attribute weight.
    pub fn specialty_pct(&self, attribute: Attribute) -> i64 {
        if !self.is_specialist(attribute) {
            return 100;
        }
        if self.specialties.len() == 1 { 250 } else { 180 }
    }

    pub fn form_pct(&self) -> i64 {
        100 + 35 * self.form as i64
    }

    pub fn combination_pct(&self) -> i64 {
        100 + 15 * self.combination_level as i64
    }
}

// ============================================================================
// Derivation
// ============================================================================

#[derive(Clone, Copy)]
enum Scaling {
    /// form × combination × rarity
    Full,
    /// form × combination
    FormCombination,
    None,
}

struct Formula {
    stat: DerivedStat,
    floor: i64,
    /// Weight in hundredths; negative weights lower the stat.
    primary: (Attribute, i64),
    secondary: Option<(Attribute, i64)>,
    scaling: Scaling,
}

const FORMULAS: [Formula; DerivedStat::COUNT] = [
    Formula {
        stat: DerivedStat::PhysicalAttack,
        floor: 15,
        primary: (Attribute::Strength, 300),
        secondary: Some((Attribute::Speed, 80)),
        scaling: Scaling::Full,
    },
    Formula {
        stat: DerivedStat::MagicalAttack,
        floor: 15,
        primary: (Attribute::Magic, 300),
        secondary: Some((Attribute::Energy, 80)),
        scaling: Scaling::Full,
    },
    Formula {
        stat: DerivedStat::PhysicalDefense,
        floor: 8,
        primary: (Attribute::Stamina, 250),
        secondary: Some((Attribute::Strength, 80)),
        scaling: Scaling::Full,
    },
    Formula {
        stat: DerivedStat::MagicalDefense,
        floor: 8,
        primary: (Attribute::Energy, 250),
        secondary: Some((Attribute::Magic, 80)),
        scaling: Scaling::Full,
    },
    Formula {
        stat: DerivedStat::MaxHealth,
        floor: 80,
        primary: (Attribute::Stamina, 500),
        secondary: Some((Attribute::Energy, 200)),
        scaling: Scaling::Full,
    },
    Formula {
        stat: DerivedStat::Initiative,
        floor: 12,
        primary: (Attribute::Speed, 300),
        secondary: Some((Attribute::Energy, 50)),
        scaling: Scaling::FormCombination,
    },
    Formula {
        stat: DerivedStat::CriticalChance,
        floor: 8,
        primary: (Attribute::Speed, 80),
        secondary: Some((Attribute::Magic, 30)),
        scaling: Scaling::None,
    },
    Formula {
        stat: DerivedStat::DodgeChance,
        floor: 5,
        primary: (Attribute::Speed, 50),
        secondary: Some((Attribute::Stamina, 20)),
        scaling: Scaling::None,
    },
    Formula {
        stat: DerivedStat::EnergyCost,
        floor: 12,
        primary: (Attribute::Energy, -30),
        secondary: None,
        scaling: Scaling::None,
    },
];

/// Unclamped base value of one stat before any modification layers.
fn base_value(formula: &Formula, profile: &CreatureProfile, attributes: &BaseAttributes) -> i64 {
    // Units of 1/10000: weights carry two decimals, the specialty multiplier two more.
    let (primary, weight) = formula.primary;
    let mut sum = formula.floor * 10_000
        + attributes.get(primary) as i64 * weight * profile.specialty_pct(primary);
    if let Some((secondary, weight)) = formula.secondary {
        sum += attributes.get(secondary) as i64 * weight * 100;
    }

    let (numerator, denominator) = match formula.scaling {
        Scaling::Full => (
            profile.form_pct() * profile.combination_pct() * profile.rarity.stat_pct(),
            1_000_000,
        ),
        Scaling::FormCombination => (profile.form_pct() * profile.combination_pct(), 10_000),
        Scaling::None => (1, 1),
    };

    // Large combination levels or attributes push the product past i64.
    div_round_saturating(
        sum as i128 * numerator as i128,
        10_000 * denominator as i128,
    )
}

/// Derive the full stat block of a creature.
///
/// # Arguments
///
/// * `profile` - Attributes, specialties, form, combination level and rarity
/// * `permanent` - Permanent modifications (e.g. death gifts)
/// * `overlay` - Fold of all active effect deltas
///
/// # Returns
///
/// Stats with every per-stat bound applied. Pure and idempotent.
pub fn derive_stats(
    profile: &CreatureProfile,
    permanent: &StatDelta,
    overlay: &StatDelta,
) -> DerivedStats {
    let mut stats = DerivedStats::default();

    for formula in FORMULAS.iter() {
        let base = match &profile.attributes {
            Some(attributes) => base_value(formula, profile, attributes),
            None => DerivedStats::FALLBACK.get(formula.stat) as i64,
        };
        let value = base + permanent.get(formula.stat) as i64 + overlay.get(formula.stat) as i64;
        stats.set(formula.stat, formula.stat.bounds().clamp(value));
    }

    stats
}
