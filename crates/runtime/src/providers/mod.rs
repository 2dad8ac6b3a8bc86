//! Turn providers: where a side's actions for one turn come from.
//!
//! The session driver asks a [`TurnProvider`] for a whole-turn plan so the
//! battle can run with the opponent planner, scripted fixtures or a passive
//! side that only ends its turns.

pub mod ai;

use battle_core::{BattleState, RngOracle, Side};

pub use ai::{OpponentPlanner, TurnPlan};

/// Source of whole-turn plans.
pub trait TurnProvider {
    /// Plan `side`'s turn on a read-only snapshot of the battle.
    ///
    /// # Arguments
    /// * `state` - Current battle state
    /// * `side` - Side that is about to act
    /// * `rng` - Oracle for planning rolls
    ///
    /// # Returns
    /// Ordered actions terminated by `EndTurn`.
    fn plan_turn(&self, state: &BattleState, side: Side, rng: &dyn RngOracle) -> TurnPlan;
}

/// A provider that always ends the turn immediately.
/// Useful for testing or as a fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndTurnProvider;

impl TurnProvider for EndTurnProvider {
    fn plan_turn(&self, _state: &BattleState, _side: Side, _rng: &dyn RngOracle) -> TurnPlan {
        TurnPlan::end_turn()
    }
}
