//! Session driver: executes planned turns and records what happened.
//!
//! A planned turn is executed action by action through
//! [`battle_core::execute`]. Actions the engine rejects are skipped and
//! never retried; if the plan leaves the side still active, the driver ends
//! the turn itself.
//!
//! [`BattleSession`] keeps only accepted actions in its state and history,
//! so replaying the history from the initial state reproduces the current
//! state bit for bit (see [`BattleSession::verify`]).

use battle_core::{
    ActionOutcome, BattleAction, BattleError, BattleState, LogEntry, OpponentConfig, PcgRng,
    Phase, RngOracle, Side, SideSetup, execute, start_battle, submit_action,
};

use crate::error::{Result, RuntimeError};
use crate::providers::{OpponentPlanner, TurnProvider};

/// Result of running one side's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpponentTurnOutcome {
    pub state: BattleState,
    /// Log entries appended during the turn.
    pub log: Vec<LogEntry>,
    /// Accepted actions in execution order.
    pub actions_taken: Vec<BattleAction>,
    /// Planned actions the engine rejected.
    pub skipped: usize,
}

/// Run the opponent's turn with `planner`.
///
/// Does nothing unless the battle is active and the opponent is to act.
pub fn run_opponent_turn(
    state: &BattleState,
    planner: &dyn TurnProvider,
    rng: &dyn RngOracle,
) -> OpponentTurnOutcome {
    run_side_turn(state, Side::Opponent, planner, rng)
}

/// Run `side`'s turn with `provider`.
///
/// Used for the opponent and for autoplaying the player side.
pub fn run_side_turn(
    state: &BattleState,
    side: Side,
    provider: &dyn TurnProvider,
    rng: &dyn RngOracle,
) -> OpponentTurnOutcome {
    let start = state.log.len();
    let mut current = state.clone();
    let mut actions_taken = Vec::new();
    let mut skipped = 0;

    if current.phase != Phase::Active || current.active_side != side {
        tracing::warn!(
            "{side} turn requested while {} is to act in phase {}",
            current.active_side,
            current.phase
        );
        return OpponentTurnOutcome {
            state: current,
            log: Vec::new(),
            actions_taken,
            skipped,
        };
    }

    let plan = provider.plan_turn(&current, side, rng);
    for action in &plan.actions {
        if current.is_over() || current.active_side != side {
            break;
        }
        let outcome = execute(&current, side, action, rng);
        match outcome.error {
            None => {
                current = outcome.state;
                actions_taken.push(action.clone());
            }
            Some(error) => {
                skipped += 1;
                tracing::warn!(
                    "{side} skipped {action}: {error} ({})",
                    error.severity().as_str()
                );
            }
        }
    }

    if !current.is_over() && current.active_side == side {
        tracing::warn!("{side} plan left the turn open, ending it");
        let outcome = execute(&current, side, &BattleAction::EndTurn, rng);
        if outcome.is_accepted() {
            current = outcome.state;
            actions_taken.push(BattleAction::EndTurn);
        }
    }

    tracing::info!(
        side = %side,
        turn = state.turn,
        actions = actions_taken.len(),
        skipped,
        phase = %current.phase,
        "turn finished"
    );

    let log = current.log[start..].to_vec();
    OpponentTurnOutcome {
        state: current,
        log,
        actions_taken,
        skipped,
    }
}

/// One accepted action, in battle order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub side: Side,
    pub action: BattleAction,
}

/// What a single player submission caused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionStep {
    /// Engine outcome of the submission. Its `log` is the only record of a
    /// rejection: the line is not kept in the session's state log.
    pub player: ActionOutcome,
    /// The opponent turn that followed an accepted `EndTurn`.
    pub opponent: Option<OpponentTurnOutcome>,
}

/// A battle in progress: current state, dice, opponent planner and history.
pub struct BattleSession<R = PcgRng, P = OpponentPlanner> {
    initial: BattleState,
    state: BattleState,
    rng: R,
    planner: P,
    history: Vec<HistoryEntry>,
}

impl BattleSession {
    /// Start a battle with production dice and the opponent planner.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Setup`] when the setup is invalid.
    pub fn start(player: SideSetup, opponent: OpponentConfig, seed: u64) -> Result<Self> {
        let state = start_battle(player, opponent, seed)?;
        Ok(Self::new(state, PcgRng, OpponentPlanner::new()))
    }
}

impl<R: RngOracle, P: TurnProvider> BattleSession<R, P> {
    pub fn new(state: BattleState, rng: R, planner: P) -> Self {
        Self {
            initial: state.clone(),
            state,
            rng,
            planner,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Accepted actions of both sides since the session started.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn digest(&self) -> [u8; 32] {
        self.state.digest()
    }

    /// Submit a player action.
    ///
    /// A rejected action leaves the session untouched, state log included.
    /// Callers that show the battle log must render `step.player.log` as
    /// well as the state log, or the "cannot" line is lost. An accepted
    /// `EndTurn` runs the opponent's whole turn before returning.
    pub fn submit(&mut self, action: BattleAction) -> SessionStep {
        let player = submit_action(&self.state, &action, &self.rng);
        if !player.is_accepted() {
            return SessionStep {
                player,
                opponent: None,
            };
        }

        self.state = player.state.clone();
        self.history.push(HistoryEntry {
            side: Side::Player,
            action: action.clone(),
        });

        let opponent_to_act = action.is_end_turn()
            && !self.state.is_over()
            && self.state.active_side == Side::Opponent;
        let opponent = opponent_to_act.then(|| {
            let turn = run_opponent_turn(&self.state, &self.planner, &self.rng);
            self.history
                .extend(turn.actions_taken.iter().map(|action| HistoryEntry {
                    side: Side::Opponent,
                    action: action.clone(),
                }));
            self.state = turn.state.clone();
            turn
        });

        SessionStep { player, opponent }
    }

    /// Re-execute the history from the initial state.
    pub fn replay(&self) -> Result<BattleState> {
        replay(&self.initial, &self.history, &self.rng)
    }

    /// Check that replaying the history reproduces the current state.
    pub fn verify(&self) -> Result<()> {
        if self.replay()?.digest() == self.digest() {
            Ok(())
        } else {
            Err(RuntimeError::DigestMismatch)
        }
    }
}

/// Execute `history` against `initial`.
///
/// # Errors
///
/// [`RuntimeError::ReplayDiverged`] at the first recorded action the engine
/// rejects.
pub fn replay(
    initial: &BattleState,
    history: &[HistoryEntry],
    rng: &dyn RngOracle,
) -> Result<BattleState> {
    let mut state = initial.clone();
    for (index, entry) in history.iter().enumerate() {
        let outcome = execute(&state, entry.side, &entry.action, rng);
        if let Some(source) = outcome.error {
            return Err(RuntimeError::ReplayDiverged {
                index,
                side: entry.side,
                action: entry.action.clone(),
                source,
            });
        }
        state = outcome.state;
    }
    Ok(state)
}
