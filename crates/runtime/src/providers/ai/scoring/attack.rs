//! Attack scoring: threat estimation and attacker/target pair value.
//!
//! # Formula
//!
//! ```text
//! threat = (max_attack × 2 + max_health / 10) × rarity_factor × (1 + 0.2 × form)
//! pair   = damage × 3 + (kill ? 100 : 0) + (1 − hp_ratio) × 50 + threat × 0.5
//! ```
//!
//! Rarity factors are 1.0 / 1.5 / 2.0 / 3.0 (Common through Legendary).

use battle_core::stats::div_round;
use battle_core::{Creature, CreatureId, estimate_damage};

/// Flat bonus for an attack expected to defeat its target.
pub const KILL_BONUS: i64 = 100;

/// How dangerous a creature is to the side facing it.
pub fn threat(creature: &Creature) -> i64 {
    let derived = &creature.derived;
    let base = derived.max_attack() as i64 * 2 + derived.max_health as i64 / 10;
    let form_pct = 100 + 20 * creature.form() as i64;
    div_round(base * creature.rarity().threat_pct() * form_pct, 10_000)
}

/// Value of one attacker/target pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairScore {
    pub attacker: CreatureId,
    pub target: CreatureId,
    /// Expected damage without rolls.
    pub damage: u32,
    /// Expected to bring the target to zero health.
    pub kills: bool,
    pub value: i64,
}

/// Score `attacker` hitting `target`, whose health is `remaining_health`
/// after the attacks already planned this turn.
pub fn pair_score(attacker: &Creature, target: &Creature, remaining_health: i32) -> PairScore {
    let damage = estimate_damage(attacker, target);
    let kills = damage as i64 >= remaining_health as i64;
    let max_health = target.derived.max_health.max(1) as i64;
    let ratio_pct = (remaining_health.max(0) as i64 * 100 / max_health).min(100);

    let value = damage as i64 * 3
        + if kills { KILL_BONUS } else { 0 }
        + (100 - ratio_pct) / 2
        + threat(target) / 2;

    PairScore {
        attacker: attacker.id,
        target: target.id,
        damage,
        kills,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BaseAttributes, CreatureProfile, CreatureSpec, Rarity};

    fn creature(id: u32, rarity: Rarity, form: u8) -> Creature {
        Creature::new(CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                rarity,
                form,
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        ))
    }

    #[test]
    fn threat_scales_with_rarity_and_form() {
        let common = creature(1, Rarity::Common, 0);
        let legendary = creature(2, Rarity::Legendary, 0);
        let evolved = creature(3, Rarity::Common, 2);

        assert!(threat(&legendary) > threat(&common));
        assert!(threat(&evolved) > threat(&common));

        let d = &common.derived;
        let base = d.max_attack() as i64 * 2 + d.max_health as i64 / 10;
        assert_eq!(threat(&common), base);
    }

    #[test]
    fn finishing_blow_outscores_chip_damage() {
        let attacker = creature(1, Rarity::Common, 0);
        let target = creature(10, Rarity::Common, 0);

        let chip = pair_score(&attacker, &target, target.derived.max_health);
        let finish = pair_score(&attacker, &target, 1);

        assert!(!chip.kills);
        assert!(finish.kills);
        // 1 of 115 health rounds to a 0% ratio
        assert_eq!(finish.value - chip.value, KILL_BONUS + 50);
    }
}
