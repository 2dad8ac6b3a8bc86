//! Attack resolution.

use super::damage::calculate_damage;
use super::effectiveness::{Channel, Effectiveness, effectiveness};
use crate::config::BattleConfig;
use crate::effects::{ActiveEffect, EffectKind, attach_in_place};
use crate::env::Roller;
use crate::env::rng::context;
use crate::state::Creature;
use crate::stats::{DerivedStat, Rarity, StatDelta};

/// Chance (percent) that a critical hit leaves "Critical Strike Trauma".
pub const TRAUMA_CHANCE: u32 = 30;
/// Chance (percent) that a super effective hit leaves "Elemental Weakness".
pub const WEAKNESS_CHANCE: u32 = 40;
/// Effectiveness at which "Elemental Weakness" may trigger.
pub const WEAKNESS_THRESHOLD_PCT: u32 = 150;

/// Outcome of one attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub attacker: Creature,
    pub defender: Creature,
    pub channel: Channel,
    pub damage: u32,
    pub was_critical: bool,
    pub was_dodged: bool,
    pub effectiveness: Effectiveness,
    pub defeated: bool,
    pub message: String,
}

/// Resolve an attack of `attacker` on `defender`.
///
/// Steps: pick the channel, consume any released charge, roll dodge, compute
/// effectiveness, roll critical and variance, mitigate, apply damage, then
/// roll for lingering debuffs.
///
/// # Arguments
///
/// * `attacker` - Attacking creature
/// * `defender` - Defending creature
/// * `channel` - Forced channel; `None` picks the attacker's stronger one
/// * `roller` - Dice bound to the current action
pub fn resolve_attack(
    attacker: &Creature,
    defender: &Creature,
    channel: Option<Channel>,
    roller: &Roller<'_>,
) -> AttackResolution {
    let channel = channel.unwrap_or_else(|| Channel::preferred(&attacker.derived));
    let mut attacker = attacker.clone();
    let mut defender = defender.clone();

    if attacker.attributes().is_none() || defender.attributes().is_none() {
        return missing_stats(attacker, defender, channel);
    }

    let bonus = core::mem::take(&mut attacker.next_attack_bonus);
    let attack = channel.attack(&attacker.derived).saturating_add(bonus);
    let charged = if bonus > 0 {
        format!("{} unleashes a charged attack! ", attacker.species_name)
    } else {
        String::new()
    };

    let dodge_chance = defender.derived.dodge_chance.max(0) as u32;
    if roller.chance(defender.id.0, context::DODGE, dodge_chance) {
        let message = format!(
            "{charged}{}'s {channel} attack was skillfully dodged by {}!",
            attacker.species_name, defender.species_name
        );
        return AttackResolution {
            attacker,
            defender,
            channel,
            damage: 0,
            was_critical: false,
            was_dodged: true,
            effectiveness: Effectiveness::NEUTRAL,
            defeated: false,
            message,
        };
    }

    let effectiveness = effectiveness(channel, attacker.attributes(), defender.attributes());
    let critical_chance = attacker.derived.critical_chance.max(0) as u32;
    let was_critical = roller.chance(attacker.id.0, context::CRITICAL, critical_chance);
    let variance = roller.range(attacker.id.0, context::VARIANCE, 80, 120);

    let damage = calculate_damage(
        attack,
        channel.defense(&defender.derived),
        effectiveness.percent,
        variance,
        was_critical,
    );
    defender.take_damage(damage);
    let defeated = defender.is_defeated();

    if !defeated {
        if was_critical && roller.chance(defender.id.0, context::TRAUMA, TRAUMA_CHANCE) {
            attach_in_place(
                &mut defender,
                ActiveEffect::new("Critical Strike Trauma", EffectKind::Debuff, 2).with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalDefense, -3)
                        .with(DerivedStat::MagicalDefense, -3),
                ),
            );
        }
        if effectiveness.percent >= WEAKNESS_THRESHOLD_PCT
            && roller.chance(defender.id.0, context::WEAKNESS, WEAKNESS_CHANCE)
        {
            attach_in_place(
                &mut defender,
                ActiveEffect::new("Elemental Weakness", EffectKind::Debuff, 3).with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalDefense, -2)
                        .with(DerivedStat::MagicalDefense, -2),
                ),
            );
        }
    }

    let mut message = format!(
        "{charged}{} unleashed a {channel} attack on {}",
        attacker.species_name, defender.species_name
    );
    if was_critical {
        message.push_str(" with devastating precision (Critical Hit!)");
    }
    if effectiveness.percent != 100 {
        message.push_str(&format!(" - {}!", effectiveness.label));
    }
    message.push_str(&format!(" dealing {damage} damage."));
    message.push_str(&status_suffix(&defender));

    AttackResolution {
        attacker,
        defender,
        channel,
        damage,
        was_critical,
        was_dodged: false,
        effectiveness,
        defeated,
        message,
    }
}

fn missing_stats(attacker: Creature, mut defender: Creature, channel: Channel) -> AttackResolution {
    let damage = defender.take_damage(BattleConfig::MISSING_STATS_DAMAGE);
    let defeated = defender.is_defeated();
    let message = format!(
        "{} struck {} for {} damage; combat stats were missing.{}",
        attacker.species_name,
        defender.species_name,
        damage,
        status_suffix(&defender)
    );
    AttackResolution {
        attacker,
        defender,
        channel,
        damage,
        was_critical: false,
        was_dodged: false,
        effectiveness: Effectiveness::NEUTRAL,
        defeated,
        message,
    }
}

fn status_suffix(defender: &Creature) -> String {
    let name = &defender.species_name;
    if defender.is_defeated() {
        match defender.rarity() {
            Rarity::Legendary => format!(" {name} falls in legendary fashion!"),
            Rarity::Epic => format!(" {name} has been epically defeated!"),
            _ => format!(" {name} was defeated!"),
        }
    } else if defender.health_pct() < 20 {
        format!(" {name} is critically wounded!")
    } else if defender.health_pct() < 50 {
        format!(" {name} is badly hurt!")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedRng;
    use crate::state::CreatureSpec;
    use crate::stats::{BaseAttributes, CreatureProfile};

    fn creature(id: u32, name: &str) -> Creature {
        Creature::new(CreatureSpec::new(
            id,
            name,
            CreatureProfile {
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        ))
    }

    fn duel() -> (Creature, Creature) {
        let mut attacker = creature(1, "Fangrel");
        attacker.derived.physical_attack = 20;
        attacker.derived.magical_attack = 10;
        attacker.derived.critical_chance = 0;
        let mut defender = creature(2, "Shellback");
        defender.derived.physical_defense = 10;
        defender.derived.dodge_chance = 0;
        (attacker, defender)
    }

    #[test]
    fn neutral_attack_deals_fifteen() {
        let (attacker, defender) = duel();
        let roller = Roller::new(&FixedRng::NEUTRAL, 9, 0);

        let out = resolve_attack(&attacker, &defender, None, &roller);
        assert_eq!(out.channel, Channel::Physical);
        assert_eq!(out.damage, 15);
        assert!(out.damage > BattleConfig::MIN_DAMAGE && out.damage < 20);
        assert_eq!(out.defender.current_health, defender.current_health - 15);
        assert!(!out.was_critical && !out.was_dodged);
        assert!(out.message.contains("Fangrel"));
        assert!(out.message.contains("Shellback"));
    }

    #[test]
    fn dodge_consumes_charge_and_deals_nothing() {
        let (mut attacker, mut defender) = duel();
        attacker.next_attack_bonus = 25;
        defender.derived.dodge_chance = 10;
        // every d100 rolls 1
        let roller = Roller::new(&FixedRng(0), 9, 0);

        let out = resolve_attack(&attacker, &defender, None, &roller);
        assert!(out.was_dodged);
        assert_eq!(out.damage, 0);
        assert_eq!(out.attacker.next_attack_bonus, 0);
        assert_eq!(out.defender, defender);
        assert!(out.message.contains("skillfully dodged"));
    }

    #[test]
    fn critical_hit_can_leave_trauma() {
        let (mut attacker, defender) = duel();
        attacker.derived.critical_chance = 10;
        let roller = Roller::new(&FixedRng(0), 9, 0);

        let out = resolve_attack(&attacker, &defender, None, &roller);
        assert!(out.was_critical);
        // variance 80%, critical ×2: 20 × 0.8 × 2 × 0.75
        assert_eq!(out.damage, 24);
        assert_eq!(out.defender.effects[0].name, "Critical Strike Trauma");
        assert!(out.message.contains("Critical Hit!"));
    }

    #[test]
    fn missing_stats_deal_fixed_damage() {
        let (attacker, mut defender) = duel();
        defender.profile.attributes = None;
        let roller = Roller::new(&FixedRng(0), 9, 0);

        let out = resolve_attack(&attacker, &defender, None, &roller);
        assert_eq!(out.damage, BattleConfig::MISSING_STATS_DAMAGE);
        assert!(!out.was_critical && !out.was_dodged);
        assert!(out.message.contains("missing"));
    }

    #[test]
    fn lethal_hit_reports_defeat() {
        let (attacker, mut defender) = duel();
        defender.current_health = 5;
        let roller = Roller::new(&FixedRng::NEUTRAL, 9, 0);

        let out = resolve_attack(&attacker, &defender, None, &roller);
        assert!(out.defeated);
        assert_eq!(out.defender.current_health, 0);
        assert!(out.message.ends_with("Shellback was defeated!"));
    }
}
