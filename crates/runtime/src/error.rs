//! Errors surfaced by the session driver.
//!
//! Rejected actions are not errors at this level: the engine reports them on
//! the [`battle_core::ActionOutcome`] and the session passes that through.
//! What remains are failures to build a battle and replays that stop
//! matching their recording.

use battle_core::{ActionError, BattleAction, SetupError, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to set up the battle")]
    Setup(#[from] SetupError),

    #[error("replay diverged at action {index}: {side} {action}")]
    ReplayDiverged {
        index: usize,
        side: Side,
        action: BattleAction,
        #[source]
        source: ActionError,
    },

    #[error("replayed state digest does not match the recording")]
    DigestMismatch,
}
