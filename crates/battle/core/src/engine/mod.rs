//! Turn engine.
//!
//! Every public entry point takes a state by reference and returns a new
//! state value. Internally a [`BattleEngine`] borrows a working copy
//! mutably, validates the intent, resolves it and runs the post-action
//! sequence (cleanup, death effects, terminal check). A rejected action
//! discards the working copy, so the caller sees the original state plus a
//! single log entry.

mod cleanup;
mod handlers;
mod setup;
mod turns;

pub use setup::{OpponentConfig, SideSetup, start_battle};

use crate::action::BattleAction;
use crate::env::{RngOracle, Roller};
use crate::error::ActionError;
use crate::state::{BattleState, LogEntry, Phase, Side};

/// Result of submitting one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    /// State after the action (or the original state plus one log line when
    /// the action was rejected).
    pub state: BattleState,
    /// Log entries appended by this call.
    pub log: Vec<LogEntry>,
    pub error: Option<ActionError>,
}

impl ActionOutcome {
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }
}

/// Mutable view over a working copy of the battle.
pub(crate) struct BattleEngine<'a> {
    state: &'a mut BattleState,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEngine<'a> {
    pub(crate) fn new(state: &'a mut BattleState, rng: &'a dyn RngOracle) -> Self {
        Self { state, rng }
    }

    /// Dice bound to the action currently being resolved.
    fn roller(&self) -> Roller<'a> {
        Roller::new(self.rng, self.state.seed, self.state.nonce)
    }

    /// Route an action to its handler.
    fn apply(&mut self, side: Side, action: &BattleAction) -> Result<(), ActionError> {
        match *action {
            BattleAction::Deploy { creature } => self.deploy(side, creature),
            BattleAction::Attack { attacker, defender } => self.attack(side, attacker, defender),
            BattleAction::UseTool { tool, target } => self.use_tool(side, tool, target),
            BattleAction::UseSpell {
                spell,
                caster,
                target,
            } => self.use_spell(side, spell, caster, target),
            BattleAction::Defend { creature } => self.defend(side, creature),
            BattleAction::EndTurn => {
                self.end_turn(side);
                Ok(())
            }
        }
    }
}

/// Player entry point.
///
/// Rejected with [`ActionError::NotYourTurn`] while the opponent is active.
pub fn submit_action(
    state: &BattleState,
    action: &BattleAction,
    rng: &dyn RngOracle,
) -> ActionOutcome {
    execute(state, Side::Player, action, rng)
}

/// Execute an action on behalf of `side`.
///
/// Shared by the player entry point and the opponent driver.
///
/// # Returns
///
/// - Terminal phase: the state unchanged, no log, [`ActionError::BattleOver`]
/// - Rejection: the state plus exactly one explanatory log entry
/// - Success: the resolved state with the nonce advanced by one
pub fn execute(
    state: &BattleState,
    side: Side,
    action: &BattleAction,
    rng: &dyn RngOracle,
) -> ActionOutcome {
    if state.phase.is_terminal() {
        return ActionOutcome {
            state: state.clone(),
            log: Vec::new(),
            error: Some(ActionError::BattleOver { phase: state.phase }),
        };
    }

    let result = if state.phase != Phase::Active || state.active_side != side {
        Err(ActionError::NotYourTurn)
    } else {
        let mut next = state.clone();
        let applied = BattleEngine::new(&mut next, rng).apply(side, action);
        applied.map(|()| next)
    };

    match result {
        Ok(mut next) => {
            next.nonce = next.nonce.wrapping_add(1);
            let log = next.log[state.log.len()..].to_vec();
            ActionOutcome {
                state: next,
                log,
                error: None,
            }
        }
        Err(error) => reject(state, side, action, error),
    }
}

fn reject(
    state: &BattleState,
    side: Side,
    action: &BattleAction,
    error: ActionError,
) -> ActionOutcome {
    let mut state = state.clone();
    state.push_log(format!(
        "{} cannot {}: {error}.",
        actor_label(side),
        action.verb()
    ));
    let log = state.log[state.log.len() - 1..].to_vec();
    ActionOutcome {
        state,
        log,
        error: Some(error),
    }
}

/// "You" / "Enemy" prefix for log lines.
pub(crate) const fn actor_label(side: Side) -> &'static str {
    match side {
        Side::Player => "You",
        Side::Opponent => "Enemy",
    }
}

/// "Your" / "Enemy" possessive for log lines.
pub(crate) const fn owner_label(side: Side) -> &'static str {
    match side {
        Side::Player => "Your",
        Side::Opponent => "Enemy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, DifficultyProfile};
    use crate::env::{FixedRng, PcgRng};
    use crate::state::{CreatureId, CreatureSpec};
    use crate::stats::{BaseAttributes, CreatureProfile};

    fn spec(id: u32, name: &str) -> CreatureSpec {
        CreatureSpec::new(
            id,
            name,
            CreatureProfile {
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        )
    }

    fn battle() -> BattleState {
        let player = SideSetup {
            field: vec![spec(1, "Fangrel")],
            hand: vec![spec(2, "Mosswing")],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            profile: DifficultyProfile::for_tier(Difficulty::Medium),
            setup: SideSetup {
                field: vec![spec(10, "Shellback")],
                hand: vec![spec(11, "Cinderpaw")],
                ..SideSetup::default()
            },
        };
        match start_battle(player, opponent, 42) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        }
    }

    #[test]
    fn rejection_only_appends_one_log_entry() {
        let mut state = battle();
        state.player.energy = 1;
        let action = BattleAction::Attack {
            attacker: CreatureId(1),
            defender: CreatureId(10),
        };

        let out = submit_action(&state, &action, &PcgRng);
        assert_eq!(
            out.error,
            Some(ActionError::NotEnoughEnergy {
                required: 2,
                available: 1
            })
        );
        assert_eq!(out.log.len(), 1);
        assert_eq!(out.state.log.len(), state.log.len() + 1);

        let mut expected = out.state.clone();
        expected.log.pop();
        assert_eq!(expected, state);
    }

    #[test]
    fn accepted_action_advances_nonce() {
        let state = battle();
        let action = BattleAction::Attack {
            attacker: CreatureId(1),
            defender: CreatureId(10),
        };

        let out = submit_action(&state, &action, &FixedRng::NEUTRAL);
        assert!(out.is_accepted());
        assert_eq!(out.state.nonce, state.nonce + 1);
        assert_eq!(out.state.player.energy, state.player.energy - 2);
        assert!(!out.log.is_empty());
    }

    #[test]
    fn opponent_actions_are_rejected_on_player_turn() {
        let state = battle();
        let out = execute(&state, Side::Opponent, &BattleAction::EndTurn, &PcgRng);
        assert_eq!(out.error, Some(ActionError::NotYourTurn));
        assert_eq!(out.state.active_side, Side::Player);
    }

    #[test]
    fn terminal_state_is_returned_unchanged() {
        let mut state = battle();
        state.phase = Phase::Won;

        let out = submit_action(&state, &BattleAction::EndTurn, &PcgRng);
        assert_eq!(out.state, state);
        assert!(out.log.is_empty());
        assert!(matches!(
            out.error,
            Some(ActionError::BattleOver { phase: Phase::Won })
        ));
    }

    #[test]
    fn same_seed_and_actions_replay_identically() {
        let actions = [
            BattleAction::Attack {
                attacker: CreatureId(1),
                defender: CreatureId(10),
            },
            BattleAction::EndTurn,
        ];

        let run = || {
            let mut state = battle();
            for action in &actions {
                state = submit_action(&state, action, &PcgRng).state;
            }
            state
        };
        assert_eq!(run(), run());
    }
}
