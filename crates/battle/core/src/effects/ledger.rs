use super::{ActiveEffect, Expiry};
use crate::state::Creature;
use crate::stats::{StatDelta, div_round};

/// Health scaling applied to per-tick deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickScaling {
    /// Tier multiplier from the difficulty profile (percent).
    pub health_pct: u32,
}

impl TickScaling {
    pub const NEUTRAL: Self = Self { health_pct: 100 };

    pub const fn new(health_pct: u32) -> Self {
        Self { health_pct }
    }
}

/// Additive fold of every active stat delta.
pub fn overlay(effects: &[ActiveEffect]) -> StatDelta {
    let mut total = StatDelta::new();
    for effect in effects {
        total.add(&effect.stat_delta);
    }
    total
}

/// Attach an effect, assigning its id from the creature's sequence.
pub fn attach(mut creature: Creature, effect: ActiveEffect) -> Creature {
    attach_in_place(&mut creature, effect);
    creature
}

/// [`attach`] through a mutable reference.
pub(crate) fn attach_in_place(creature: &mut Creature, mut effect: ActiveEffect) {
    effect.id = creature.effect_seq;
    creature.effect_seq = creature.effect_seq.wrapping_add(1);
    creature.effects.push(effect);
    creature.recompute();
}

/// Advance every countdown effect of a creature by one owning-side turn.
///
/// # Returns
///
/// The updated creature and the log lines produced (health changes, charge
/// releases, expirations), in effect order.
pub fn tick(mut creature: Creature, scaling: TickScaling) -> (Creature, Vec<String>) {
    let mut log = Vec::new();
    let mut kept = Vec::with_capacity(creature.effects.len());
    let rarity_pct = creature.rarity().tick_pct();

    for mut effect in core::mem::take(&mut creature.effects) {
        if effect.expiry == Expiry::TurnStart {
            kept.push(effect);
            continue;
        }

        if effect.health_delta_per_tick != 0 {
            let scaled = div_round(
                effect.health_delta_per_tick as i64 * scaling.health_pct as i64 * rarity_pct,
                10_000,
            ) as i32;
            let applied = creature.adjust_health(scaled);
            if applied > 0 {
                log.push(format!(
                    "{} recovered {} health from {}.",
                    creature.species_name, applied, effect.name
                ));
            } else if applied < 0 {
                log.push(format!(
                    "{} took {} damage from {}.",
                    creature.species_name, -applied, effect.name
                ));
            }
        }

        if let Some(charge) = effect.charge.as_mut() {
            charge.accumulated += charge.per_tick;
            charge.ticks += 1;
            if charge.ticks >= charge.ticks_required {
                let released = charge.accumulated + charge.final_burst;
                creature.next_attack_bonus = creature.next_attack_bonus.saturating_add(released);
                log.push(format!(
                    "{}'s {} is fully charged! Next attack gains {} damage.",
                    creature.species_name, effect.name, released
                ));
                continue;
            }
        }

        effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
        if effect.remaining_duration == 0 {
            log.push(format!(
                "{} has worn off from {}.",
                effect.name, creature.species_name
            ));
            continue;
        }
        kept.push(effect);
    }

    creature.effects = kept;
    creature.recompute();
    (creature, log)
}

/// Drop a creature's defensive stance at the start of its side's turn.
pub fn clear_defending(mut creature: Creature) -> Creature {
    creature.is_defending = false;
    creature
        .effects
        .retain(|effect| effect.expiry != Expiry::TurnStart);
    creature.recompute();
    creature
}
