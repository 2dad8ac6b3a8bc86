//! One-shot effects triggered when a creature is removed from the field.
//!
//! Rules are checked in order and only the first match fires:
//!
//! 1. Legendary: every surviving ally gains `+3/+3` attack permanently
//! 2. Energy specialist: allies gain "Energy Release" (`energy_cost −1`, 3 turns)
//! 3. Epic: allies gain "Epic Essence" (`+1` attack and defense, 5 turns)

use super::{ActiveEffect, EffectKind, attach};
use crate::state::Creature;
use crate::stats::{Attribute, DerivedStat, Rarity, StatDelta};

/// Which death rule a defeated creature triggers, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathEffect {
    FinalGift,
    EnergyRelease,
    EpicEssence,
}

impl DeathEffect {
    pub fn for_creature(creature: &Creature) -> Option<Self> {
        if creature.rarity() == Rarity::Legendary {
            Some(Self::FinalGift)
        } else if creature.is_specialist(Attribute::Energy) {
            Some(Self::EnergyRelease)
        } else if creature.rarity() == Rarity::Epic {
            Some(Self::EpicEssence)
        } else {
            None
        }
    }
}

/// Apply the defeated creature's death effect to its surviving allies.
///
/// # Returns
///
/// The updated allies and a log line when a rule fired.
pub fn on_defeat(defeated: &Creature, allies: Vec<Creature>) -> (Vec<Creature>, Option<String>) {
    let Some(rule) = DeathEffect::for_creature(defeated) else {
        return (allies, None);
    };

    let name = &defeated.species_name;
    let allies = allies
        .into_iter()
        .map(|ally| match rule {
            DeathEffect::FinalGift => {
                let mut ally = ally;
                ally.permanent.add(
                    &StatDelta::new()
                        .with(DerivedStat::PhysicalAttack, 3)
                        .with(DerivedStat::MagicalAttack, 3),
                );
                ally.recompute();
                ally
            }
            DeathEffect::EnergyRelease => attach(
                ally,
                ActiveEffect::new("Energy Release", EffectKind::Buff, 3)
                    .with_delta(StatDelta::new().with(DerivedStat::EnergyCost, -1)),
            ),
            DeathEffect::EpicEssence => attach(
                ally,
                ActiveEffect::new("Epic Essence", EffectKind::Buff, 5).with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalAttack, 1)
                        .with(DerivedStat::MagicalAttack, 1)
                        .with(DerivedStat::PhysicalDefense, 1)
                        .with(DerivedStat::MagicalDefense, 1),
                ),
            ),
        })
        .collect::<Vec<_>>();

    let message = match rule {
        DeathEffect::FinalGift => {
            format!("{name}'s Final Gift: the fallen legendary empowers its allies!")
        }
        DeathEffect::EnergyRelease => {
            format!("{name} releases its stored energy to its allies!")
        }
        DeathEffect::EpicEssence => format!("{name}'s essence lingers on the field!"),
    };

    (allies, Some(message))
}
