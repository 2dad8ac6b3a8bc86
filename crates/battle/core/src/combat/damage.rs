//! Damage calculation.

use super::effectiveness::{Channel, effectiveness};
use crate::config::BattleConfig;
use crate::state::Creature;
use crate::stats::{div_round, div_round_saturating};

/// Upper bound of defense mitigation in basis points (85%).
pub const MAX_REDUCTION_BP: i64 = 8_500;

/// Critical multiplier for attacks (percent).
pub const CRITICAL_PCT: i64 = 200;

/// Bonus for attacks exceeding twice the defense (percent).
pub const OVERWHELMING_PCT: i64 = 130;

/// Defense mitigation in basis points.
///
/// # Formula
///
/// ```text
/// reduction = min(0.85, defense / (defense + 1.5 × attack))
/// ```
pub fn reduction_bp(attack: i64, defense: i64) -> i64 {
    let denominator = 2 * defense + 3 * attack;
    if denominator <= 0 || defense <= 0 {
        return 0;
    }
    (defense * 20_000 / denominator).min(MAX_REDUCTION_BP)
}

/// Calculate the damage of a landed attack.
///
/// # Formula
///
/// ```text
/// raw   = attack × effectiveness × variance × critical
/// final = max(2, round(raw × (1 − reduction)))
/// if attack > 2 × defense:
///     final = round(final × 1.3)
/// ```
///
/// # Arguments
///
/// * `attack` - Channel attack value including any released charge
/// * `defense` - Defender's channel defense
/// * `effectiveness_pct` - Effectiveness multiplier (percent)
/// * `variance_pct` - Random variance, 80..=120
/// * `critical` - Whether the critical multiplier applies
pub fn calculate_damage(
    attack: i32,
    defense: i32,
    effectiveness_pct: u32,
    variance_pct: u32,
    critical: bool,
) -> u32 {
    let attack = attack.max(0) as i64;
    let defense = defense.max(0) as i64;
    let crit_pct = if critical { CRITICAL_PCT } else { 100 };

    let mitigated = 10_000 - reduction_bp(attack, defense);
    let numerator = attack as i128
        * effectiveness_pct as i128
        * variance_pct as i128
        * crit_pct as i128
        * mitigated as i128;
    let mut damage = div_round_saturating(numerator, 1_000_000 * 10_000)
        .max(BattleConfig::MIN_DAMAGE as i64);

    if attack > 2 * defense {
        damage = div_round(damage * OVERWHELMING_PCT, 100);
    }

    damage.min(u32::MAX as i64) as u32
}

/// Deterministic expected damage: no dodge, no critical, variance 100%.
///
/// Used by the opponent planner to evaluate attacks without rolling.
pub fn estimate_damage(attacker: &Creature, defender: &Creature) -> u32 {
    estimate_damage_on(attacker, defender, Channel::preferred(&attacker.derived))
}

/// [`estimate_damage`] on an explicit channel.
pub fn estimate_damage_on(attacker: &Creature, defender: &Creature, channel: Channel) -> u32 {
    if attacker.attributes().is_none() || defender.attributes().is_none() {
        return BattleConfig::MISSING_STATS_DAMAGE;
    }
    let attack = channel
        .attack(&attacker.derived)
        .saturating_add(attacker.next_attack_bonus);
    let defense = channel.defense(&defender.derived);
    let eff = effectiveness(channel, attacker.attributes(), defender.attributes());
    calculate_damage(attack, defense, eff.percent, 100, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_attack_against_ten_defense() {
        // reduction 10 / (10 + 30) = 25%
        assert_eq!(calculate_damage(20, 10, 100, 100, false), 15);
    }

    #[test]
    fn critical_doubles_before_mitigation() {
        assert_eq!(calculate_damage(20, 10, 100, 100, true), 30);
    }

    #[test]
    fn damage_has_a_floor() {
        assert_eq!(calculate_damage(1, 500, 40, 80, false), 2);
    }

    #[test]
    fn overwhelming_attacks_gain_bonus() {
        // reduction 10 / (10 + 45) = 18.18%, 30 × 0.8182 = 24.5 → 25, ×1.3 = 32.5 → 33
        assert_eq!(calculate_damage(30, 10, 100, 100, false), 33);
    }

    #[test]
    fn extreme_attack_does_not_overflow() {
        let damage = calculate_damage(i32::MAX, 1, 200, 120, true);
        assert!(damage > i32::MAX as u32);
        assert_eq!(calculate_damage(i32::MAX, i32::MAX, 40, 80, false), 412_316_860);
    }

    #[test]
    fn reduction_is_capped() {
        assert_eq!(reduction_bp(1, 10_000), MAX_REDUCTION_BP);
        assert_eq!(reduction_bp(20, 10), 2_500);
    }
}
