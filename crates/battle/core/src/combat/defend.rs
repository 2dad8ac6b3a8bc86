use crate::effects::{ActiveEffect, EffectKind, Expiry, attach_in_place};
use crate::state::Creature;
use crate::stats::{DerivedStat, StatDelta, div_round};

pub const DEFENSIVE_STANCE: &str = "Defensive Stance";

/// Put a creature into a defensive stance until its side's next turn.
///
/// # Formula
///
/// ```text
/// bonus = round(defense × boost_pct) + rarity bonus (1 / 2 / 3 / 5)
/// ```
pub fn defend(creature: &Creature, boost_pct: u32) -> Creature {
    let rarity_bonus = creature.rarity().defend_bonus();
    let boost = |defense: i32| {
        div_round(defense as i64 * boost_pct as i64, 100) as i32 + rarity_bonus
    };

    let delta = StatDelta::new()
        .with(
            DerivedStat::PhysicalDefense,
            boost(creature.derived.physical_defense),
        )
        .with(
            DerivedStat::MagicalDefense,
            boost(creature.derived.magical_defense),
        );

    let mut creature = creature.clone();
    creature.is_defending = true;
    attach_in_place(
        &mut creature,
        ActiveEffect::new(DEFENSIVE_STANCE, EffectKind::Buff, 1)
            .with_expiry(Expiry::TurnStart)
            .with_delta(delta),
    );
    creature
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CreatureSpec;
    use crate::stats::{BaseAttributes, CreatureProfile, Rarity};

    #[test]
    fn stance_boosts_both_defenses() {
        let creature = Creature::new(CreatureSpec::new(
            1,
            "Shellback",
            CreatureProfile {
                rarity: Rarity::Epic,
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        ));
        // Epic: 24.5 × 1.4 = 34.3 → 34 defense
        assert_eq!(creature.derived.physical_defense, 34);

        let defended = defend(&creature, 60);
        assert!(defended.is_defending);
        // 34 + round(20.4) + 3
        assert_eq!(defended.derived.physical_defense, 57);
        assert_eq!(defended.effects[0].expiry, Expiry::TurnStart);
    }
}
