//! Utility scoring for the opponent planner.
//!
//! Every candidate the ladder produces carries a [`Score`]. Rungs with more
//! than one option (item play) keep the candidate with the highest
//! [`Score::value`], and the planner skips candidates that are not
//! [`Score::is_possible`]. The sub-scorers that rank attacks, deployments
//! and defenders live in [`attack`] and [`deploy`].
//!
//! ```text
//! value = is_possible × situation × personality × modifier / 10000
//! ```

pub mod attack;
pub mod deploy;

pub use attack::{PairScore, pair_score, threat};
pub use deploy::{defend_priority, deploy_value};

use battle_core::Creature;

/// Rating attached to every plan candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    /// Energy covers the option and it has a subject on the board.
    pub is_possible: bool,
    /// How urgent the board makes the option (0-100), e.g. the missing
    /// health of the creature being protected.
    pub situation: u32,
    /// How much the tier leans towards the option (0-100).
    pub personality: u32,
    /// What is at stake (0-200, 100 neutral). See [`stakes_pct`].
    pub modifier: u32,
}

impl Score {
    /// Components are clamped to their ranges.
    pub const fn new(is_possible: bool, situation: u32, personality: u32, modifier: u32) -> Self {
        Self {
            is_possible,
            situation: if situation > 100 { 100 } else { situation },
            personality: if personality > 100 { 100 } else { personality },
            modifier: if modifier > 200 { 200 } else { modifier },
        }
    }

    /// A feasible option at full strength.
    pub const fn certain() -> Self {
        Self::new(true, 100, 100, 100)
    }

    /// Final value in 0-200; zero when the option is not possible.
    pub const fn value(&self) -> u32 {
        if !self.is_possible {
            return 0;
        }
        (self.situation * self.personality * self.modifier) / 10000
    }
}

/// Modifier for an option whose subject is `creature`: 75 for Common up to
/// 150 for Legendary.
pub fn stakes_pct(creature: &Creature) -> u32 {
    50 + 25 * creature.rarity().rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BaseAttributes, CreatureProfile, CreatureSpec, Rarity};

    fn creature(rarity: Rarity) -> Creature {
        Creature::new(CreatureSpec::new(
            1,
            "Subject",
            CreatureProfile {
                rarity,
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        ))
    }

    #[test]
    fn unaffordable_options_are_worth_nothing() {
        let affordable = Score::new(true, 100, 90, 100);
        let unaffordable = Score::new(false, 100, 90, 100);
        assert_eq!(affordable.value(), 90);
        assert_eq!(unaffordable.value(), 0);
    }

    #[test]
    fn stakes_follow_rarity() {
        assert_eq!(stakes_pct(&creature(Rarity::Common)), 75);
        assert_eq!(stakes_pct(&creature(Rarity::Rare)), 100);
        assert_eq!(stakes_pct(&creature(Rarity::Epic)), 125);
        assert_eq!(stakes_pct(&creature(Rarity::Legendary)), 150);
    }

    #[test]
    fn saving_a_legendary_outweighs_finishing_a_common() {
        // spell finishing a Common: 100 × 90 × 75
        let spell = Score::new(true, 100, 90, stakes_pct(&creature(Rarity::Common)));
        // tool on a Legendary at 10% health: 90 × 80 × 150
        let tool = Score::new(true, 90, 80, stakes_pct(&creature(Rarity::Legendary)));
        assert_eq!(spell.value(), 67);
        assert_eq!(tool.value(), 108);

        // the same tool on a Common barely wounded loses to the spell
        let minor = Score::new(true, 55, 80, stakes_pct(&creature(Rarity::Common)));
        assert!(minor.value() < spell.value());
    }

    #[test]
    fn components_are_clamped() {
        let score = Score::new(true, 250, 180, 900);
        assert_eq!(score.situation, 100);
        assert_eq!(score.personality, 100);
        assert_eq!(score.modifier, 200);
        assert_eq!(score.value(), 200);
    }
}
