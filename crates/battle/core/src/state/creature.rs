//! Creature instances taking part in a battle.

use crate::effects::{self, ActiveEffect};
use crate::stats::{
    Attribute, BaseAttributes, CreatureProfile, DerivedStats, Rarity, StatDelta, derive_stats,
};

/// Unique identifier of a creature within one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CreatureId(pub u32);

impl core::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-supplied description of a creature before the battle starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSpec {
    pub id: CreatureId,
    pub species_name: String,
    pub profile: CreatureProfile,
}

impl CreatureSpec {
    pub fn new(id: u32, species_name: impl Into<String>, profile: CreatureProfile) -> Self {
        Self {
            id: CreatureId(id),
            species_name: species_name.into(),
            profile,
        }
    }
}

/// A creature instance with its battle-time state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub id: CreatureId,
    pub species_name: String,
    pub profile: CreatureProfile,
    pub derived: DerivedStats,
    /// Modifications that last for the rest of the battle.
    pub permanent: StatDelta,
    pub current_health: i32,
    pub is_defending: bool,
    pub effects: Vec<ActiveEffect>,
    /// Released charge power added to the next attack.
    pub next_attack_bonus: i32,
    /// Next effect id to hand out.
    pub effect_seq: u32,
}

impl Creature {
    /// Instantiate a creature at full health.
    pub fn new(spec: CreatureSpec) -> Self {
        let derived = derive_stats(&spec.profile, &StatDelta::new(), &StatDelta::new());
        Self {
            id: spec.id,
            species_name: spec.species_name,
            profile: spec.profile,
            current_health: derived.max_health,
            derived,
            permanent: StatDelta::new(),
            is_defending: false,
            effects: Vec::new(),
            next_attack_bonus: 0,
            effect_seq: 1,
        }
    }

    #[inline]
    pub fn rarity(&self) -> Rarity {
        self.profile.rarity
    }

    #[inline]
    pub fn form(&self) -> u8 {
        self.profile.form
    }

    #[inline]
    pub fn attributes(&self) -> Option<&BaseAttributes> {
        self.profile.attributes.as_ref()
    }

    /// Attribute score, or 0 when base stats are missing.
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        self.attributes().map_or(0, |a| a.get(attribute))
    }

    pub fn is_specialist(&self, attribute: Attribute) -> bool {
        self.profile.is_specialist(attribute)
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0
    }

    /// Health as a percentage of max health (0..=100).
    pub fn health_pct(&self) -> i64 {
        if self.derived.max_health <= 0 {
            return 0;
        }
        self.current_health as i64 * 100 / self.derived.max_health as i64
    }

    /// Re-derive stats from the profile and all modifier layers, then
    /// reclamp health.
    pub fn recompute(&mut self) {
        let overlay = effects::overlay(&self.effects);
        self.derived = derive_stats(&self.profile, &self.permanent, &overlay);
        self.clamp_health();
    }

    pub fn clamp_health(&mut self) {
        self.current_health = self.current_health.clamp(0, self.derived.max_health);
    }

    /// Add (or with a negative amount remove) health, clamped to bounds.
    ///
    /// # Returns
    ///
    /// The change actually applied.
    pub fn adjust_health(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (before as i64 + amount as i64)
            .clamp(0, self.derived.max_health as i64) as i32;
        self.current_health - before
    }

    /// Apply damage; returns health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let amount = amount.min(i32::MAX as u32) as i32;
        (-self.adjust_health(-amount)) as u32
    }

    /// Heal; returns health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        self.adjust_health(amount)
    }
}
