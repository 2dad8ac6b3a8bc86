//! Simulated board the planner applies its own actions to.
//!
//! Planned actions run through the real engine on a private copy of the
//! battle with neutral dice, so every later ladder step sees energy, fields
//! and health as they will most likely be once the plan executes.

use battle_core::{BattleAction, BattleState, CreatureId, FixedRng, Side, execute};

#[derive(Clone, Debug)]
pub struct PlanBoard {
    state: BattleState,
    side: Side,
    /// Enemy creatures already attacked by the plan.
    targeted: Vec<CreatureId>,
}

impl PlanBoard {
    pub fn new(state: &BattleState, side: Side) -> Self {
        let mut state = state.clone();
        state.log.clear();
        Self {
            state,
            side,
            targeted: Vec::new(),
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn targeted(&self) -> &[CreatureId] {
        &self.targeted
    }

    /// The planning side may still act on this board.
    pub fn is_open(&self) -> bool {
        !self.state.is_over() && self.state.active_side == self.side
    }

    /// Apply one planned action. Returns `false` when the engine rejects it,
    /// leaving the board untouched.
    pub fn apply(&mut self, action: &BattleAction) -> bool {
        let outcome = execute(&self.state, self.side, action, &FixedRng::NEUTRAL);
        if !outcome.is_accepted() {
            return false;
        }
        if let BattleAction::Attack { defender, .. } = *action {
            if !self.targeted.contains(&defender) {
                self.targeted.push(defender);
            }
        }
        self.state = outcome.state;
        self.state.log.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BaseAttributes, CreatureProfile, CreatureSpec, OpponentConfig, SideSetup, start_battle,
    };

    fn spec(id: u32) -> CreatureSpec {
        CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        )
    }

    fn battle() -> BattleState {
        let player = SideSetup {
            field: vec![spec(1)],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            setup: SideSetup {
                field: vec![spec(10)],
                ..SideSetup::default()
            },
            ..OpponentConfig::default()
        };
        match start_battle(player, opponent, 3) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        }
    }

    #[test]
    fn applied_attacks_are_tracked_and_paid() {
        let state = battle();
        let mut board = PlanBoard::new(&state, Side::Player);
        let strike = BattleAction::Attack {
            attacker: CreatureId(1),
            defender: CreatureId(10),
        };

        assert!(board.apply(&strike));
        assert_eq!(board.targeted(), &[CreatureId(10)]);
        assert_eq!(board.state().player.energy, state.player.energy - 2);
        assert!(board.state().log.is_empty());
        // the real state is never touched
        assert_eq!(state.nonce, 0);
    }

    #[test]
    fn rejected_actions_leave_the_board_alone() {
        let state = battle();
        let mut board = PlanBoard::new(&state, Side::Opponent);
        assert!(!board.is_open());
        assert!(!board.apply(&BattleAction::EndTurn));
        assert_eq!(board.state().nonce, state.nonce);
    }
}
