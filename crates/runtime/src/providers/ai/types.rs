//! Planner data types: candidates, plan steps and the final turn plan.

use battle_core::BattleAction;

use super::context::PlanContext;
use super::scoring::Score;

/// A ladder step: looks at the board and maybe proposes actions.
pub type Generator = fn(&PlanContext<'_>) -> Option<Candidate>;

/// Actions proposed by one generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub score: Score,
    pub actions: Vec<BattleAction>,
    /// Execute the whole sequence and stop planning.
    pub terminal: bool,
}

impl Candidate {
    pub fn single(score: Score, action: BattleAction) -> Self {
        Self {
            score,
            actions: vec![action],
            terminal: false,
        }
    }

    pub fn sequence(score: Score, actions: Vec<BattleAction>) -> Self {
        Self {
            score,
            actions,
            terminal: false,
        }
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// A candidate whose first action ends the turn.
    pub fn ends_turn(&self) -> bool {
        self.actions.first().is_none_or(BattleAction::is_end_turn)
    }
}

/// Projected outcome of the next few turns.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stance {
    /// The exchange favors us: commit everything to attacks.
    Aggressive,
    /// The exchange goes against us: deploy and defend.
    Fortify,
    /// Too close to call.
    Hold,
}

/// One ladder decision recorded while planning.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlanStep {
    /// Name of the generator that produced the candidate.
    pub generator: String,
    pub score: u32,
    /// Actions taken from the candidate.
    pub actions: usize,
    /// The candidate was picked at random instead of by ladder order.
    pub blundered: bool,
}

/// Ordered actions for one turn, always terminated by `EndTurn`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TurnPlan {
    pub actions: Vec<BattleAction>,
    /// The multi-action roll succeeded for this turn.
    pub multi_action: bool,
    pub steps: Vec<PlanStep>,
}

impl TurnPlan {
    /// A plan that only ends the turn.
    pub fn end_turn() -> Self {
        Self {
            actions: vec![BattleAction::EndTurn],
            multi_action: false,
            steps: Vec::new(),
        }
    }
}
