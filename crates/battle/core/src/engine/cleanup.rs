use super::BattleEngine;
use crate::economy;
use crate::effects::death;
use crate::state::{Phase, Side};

impl BattleEngine<'_> {
    /// Post-action sequence: cleanup, then the terminal check.
    pub(super) fn after_action(&mut self) {
        self.cleanup(Side::Player);
        self.cleanup(Side::Opponent);
        self.check_terminal();
    }

    /// Remove defeated creatures from `side`'s field, fire their death
    /// effects on the survivors and pull energy back under the new cap.
    fn cleanup(&mut self, side: Side) {
        let own = self.state.side_mut(side);
        if own.field.iter().all(|c| !c.is_defeated()) {
            return;
        }

        let (defeated, mut survivors): (Vec<_>, Vec<_>) = core::mem::take(&mut own.field)
            .into_iter()
            .partition(|c| c.is_defeated());

        let mut lines = Vec::new();
        for fallen in &defeated {
            lines.push(format!("{} was removed from the battlefield.", fallen.species_name));
            let (updated, message) = death::on_defeat(fallen, survivors);
            survivors = updated;
            lines.extend(message);
        }
        self.state.side_mut(side).field = survivors;

        for line in lines {
            self.state.push_log(line);
        }

        let max = self.state.max_energy(side);
        let own = self.state.side_mut(side);
        own.energy = economy::reclamp(own.energy, max);
    }

    /// A side with nothing left on field, in hand or in deck loses. When
    /// both are exhausted at once the player loses.
    fn check_terminal(&mut self) {
        if self.state.phase.is_terminal() {
            return;
        }
        if self.state.player.is_exhausted() {
            self.state.phase = Phase::Lost;
            self.state
                .push_log("Defeat! All your creatures have been defeated!");
        } else if self.state.opponent.is_exhausted() {
            self.state.phase = Phase::Won;
            self.state
                .push_log("Victory! You've defeated all enemy creatures!");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::action::BattleAction;
    use crate::engine::{OpponentConfig, SideSetup, start_battle, submit_action};
    use crate::env::FixedRng;
    use crate::error::ActionError;
    use crate::state::{BattleState, CreatureId, CreatureSpec, Phase};
    use crate::stats::{Attribute, BaseAttributes, CreatureProfile, DerivedStat, Rarity};

    fn spec(id: u32, rarity: Rarity) -> CreatureSpec {
        CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                rarity,
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        )
    }

    fn battle(opponent_field: Vec<CreatureSpec>) -> BattleState {
        let player = SideSetup {
            field: vec![spec(1, Rarity::Common)],
            hand: vec![spec(2, Rarity::Common)],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            setup: SideSetup {
                field: opponent_field,
                ..SideSetup::default()
            },
            ..OpponentConfig::default()
        };
        match start_battle(player, opponent, 5) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        }
    }

    fn strike() -> BattleAction {
        BattleAction::Attack {
            attacker: CreatureId(1),
            defender: CreatureId(10),
        }
    }

    #[test]
    fn clearing_the_last_enemy_wins() {
        let mut state = battle(vec![spec(10, Rarity::Common)]);
        state.opponent.field[0].current_health = 1;

        let out = submit_action(&state, &strike(), &FixedRng::NEUTRAL);
        assert_eq!(out.state.phase, Phase::Won);
        assert!(out.state.opponent.field.is_empty());
        assert!(
            out.log
                .last()
                .is_some_and(|entry| entry.message.starts_with("Victory!"))
        );

        let after = submit_action(&out.state, &BattleAction::EndTurn, &FixedRng::NEUTRAL);
        assert_eq!(after.state, out.state);
        assert!(matches!(after.error, Some(ActionError::BattleOver { .. })));
    }

    #[test]
    fn legendary_death_empowers_allies_permanently() {
        let mut state = battle(vec![spec(10, Rarity::Legendary), spec(11, Rarity::Common)]);
        state.opponent.field[0].current_health = 1;
        let ally_attack = state.opponent.field[1].derived.physical_attack;

        let out = submit_action(&state, &strike(), &FixedRng::NEUTRAL);
        assert_eq!(out.state.phase, Phase::Active);
        let ally = &out.state.opponent.field[0];
        assert_eq!(ally.id, CreatureId(11));
        assert_eq!(ally.derived.physical_attack, ally_attack + 3);
        assert_eq!(ally.permanent.get(DerivedStat::PhysicalAttack), 3);
        assert!(out.log.iter().any(|entry| entry.message.contains("Final Gift")));
    }

    #[test]
    fn energy_release_buffs_survivors() {
        let mut fallen = spec(10, Rarity::Common);
        fallen.profile.specialties.push(Attribute::Energy);
        let mut state = battle(vec![fallen, spec(11, Rarity::Common)]);
        state.opponent.field[0].current_health = 1;

        let out = submit_action(&state, &strike(), &FixedRng::NEUTRAL);
        let ally = &out.state.opponent.field[0];
        assert_eq!(ally.effects[0].name, "Energy Release");
        assert_eq!(ally.effects[0].remaining_duration, 3);
    }
}
