//! Opponent planning and session driving for `battle-core` battles.
//!
//! The core crate answers "what happens when this action is taken"; this
//! crate decides which actions the computer-controlled side takes and runs
//! whole turns against the engine.
//!
//! Modules are organized by responsibility:
//! - [`providers`] hosts the [`TurnProvider`] abstraction and the four-tier
//!   [`OpponentPlanner`]
//! - [`session`] executes planned turns, records history and verifies replays
//! - [`error`] collects the failures a host can observe
pub mod error;
pub mod providers;
pub mod session;

pub use error::{Result, RuntimeError};
pub use providers::ai::{Candidate, PlanStep, Score, Stance};
pub use providers::{EndTurnProvider, OpponentPlanner, TurnPlan, TurnProvider};
pub use session::{
    BattleSession, HistoryEntry, OpponentTurnOutcome, SessionStep, replay, run_opponent_turn,
    run_side_turn,
};
