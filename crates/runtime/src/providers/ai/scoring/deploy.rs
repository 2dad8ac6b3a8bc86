//! Deployment value and defend priority.

use battle_core::{Attribute, Channel, Creature, effectiveness};
use strum::IntoEnumIterator;

/// Value added per opposing creature the candidate counters.
pub const COUNTER_BONUS: i64 = 25;

/// Attribute total assumed for creatures delivered without base stats.
const MISSING_STAT_TOTAL: i64 = 25;

/// Deployment value per energy, in hundredths.
///
/// # Formula
///
/// ```text
/// value = (stat_total + attack × (behind ? 3 : 1) + max_health × 0.2
///          + 25 × countered + rarity_bonus + form × 8) / energy_cost
/// ```
///
/// # Arguments
///
/// * `candidate` - Hand creature being considered
/// * `opposing` - Creatures on the opposing field
/// * `behind` - Own field is smaller than the opposing one
pub fn deploy_value(candidate: &Creature, opposing: &[Creature], behind: bool) -> i64 {
    let derived = &candidate.derived;
    let stat_total = candidate.attributes().map_or(MISSING_STAT_TOTAL, |attrs| {
        Attribute::iter().map(|a| attrs.get(a) as i64).sum()
    });
    let attack_weight = if behind { 3 } else { 1 };
    let channel = Channel::preferred(derived);
    let countered = opposing
        .iter()
        .filter(|enemy| {
            effectiveness(channel, candidate.attributes(), enemy.attributes()).percent > 100
        })
        .count() as i64;

    let value = stat_total
        + derived.max_attack() as i64 * attack_weight
        + derived.max_health as i64 / 5
        + COUNTER_BONUS * countered
        + candidate.rarity().deploy_bonus()
        + candidate.form() as i64 * 8;

    value * 100 / derived.energy_cost.max(1) as i64
}

/// How much a creature deserves a defensive stance.
///
/// `rarity rank × 10 + form × 5 + missing health %`
pub fn defend_priority(creature: &Creature) -> i64 {
    creature.rarity().rank() as i64 * 10
        + creature.form() as i64 * 5
        + (100 - creature.health_pct()).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BaseAttributes, CreatureProfile, CreatureSpec, Rarity};

    fn creature(id: u32, rarity: Rarity, attributes: BaseAttributes) -> Creature {
        Creature::new(CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                rarity,
                attributes: Some(attributes),
                ..CreatureProfile::default()
            },
        ))
    }

    #[test]
    fn falling_behind_weights_attack() {
        let candidate = creature(1, Rarity::Common, BaseAttributes::uniform(5));
        let ahead = deploy_value(&candidate, &[], false);
        let behind = deploy_value(&candidate, &[], true);

        let extra = candidate.derived.max_attack() as i64 * 2 * 100
            / candidate.derived.energy_cost as i64;
        assert!(behind > ahead);
        assert!((behind - ahead - extra).abs() <= 1);
    }

    #[test]
    fn rarer_creatures_are_worth_more() {
        let common = creature(1, Rarity::Common, BaseAttributes::uniform(5));
        let legendary = creature(2, Rarity::Legendary, BaseAttributes::uniform(5));
        // energy cost is not scaled by rarity, so value only grows
        assert!(deploy_value(&legendary, &[], false) > deploy_value(&common, &[], false));
    }

    #[test]
    fn wounded_rare_creatures_defend_first() {
        let healthy = creature(1, Rarity::Rare, BaseAttributes::uniform(5));
        let mut wounded = creature(2, Rarity::Common, BaseAttributes::uniform(5));
        wounded.current_health = wounded.derived.max_health / 2;

        assert_eq!(defend_priority(&healthy), 20);
        assert_eq!(defend_priority(&wounded), 10 + 100 - wounded.health_pct());
        assert!(defend_priority(&wounded) > defend_priority(&healthy));
    }
}
