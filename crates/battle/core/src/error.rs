//! Common error infrastructure for battle-core.
//!
//! Rejected actions never panic and never mutate the battle beyond one log
//! entry; the engine reports them through [`ActionError`]. Battle construction
//! reports through [`SetupError`].
//!
//! # Design Principles
//!
//! - **Type Safety**: each rejection reason is its own variant
//! - **Severity Classification**: errors are categorized for host handling
//! - **Deterministic**: errors carry plain ids and numbers, never references

use crate::config::BattleConfig;
use crate::economy::EconomyError;
use crate::state::{CreatureId, ItemId, Phase, Side};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same intent may succeed later (e.g. more energy next turn)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the battle can no longer accept input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("not enough energy: requires {required}, have {available}")]
    NotEnoughEnergy { required: u32, available: u32 },

    #[error("creature {0} not found")]
    CreatureNotFound(CreatureId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("creature {0} is not in hand")]
    NotInHand(CreatureId),

    #[error("creature {0} is not on the field")]
    NotOnField(CreatureId),

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("field is full ({capacity} creatures)")]
    FieldFull { capacity: usize },

    #[error("creature {0} is already defending")]
    AlreadyDefending(CreatureId),

    #[error("invalid target")]
    InvalidTarget,

    #[error("battle is over ({phase})")]
    BattleOver { phase: Phase },
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughEnergy { .. } | Self::FieldFull { .. } | Self::AlreadyDefending(_) => {
                ErrorSeverity::Recoverable
            }
            Self::CreatureNotFound(_)
            | Self::ItemNotFound(_)
            | Self::NotInHand(_)
            | Self::NotOnField(_)
            | Self::NotYourTurn
            | Self::InvalidTarget => ErrorSeverity::Validation,
            Self::BattleOver { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughEnergy { .. } => "ACTION_NOT_ENOUGH_ENERGY",
            Self::CreatureNotFound(_) => "ACTION_CREATURE_NOT_FOUND",
            Self::ItemNotFound(_) => "ACTION_ITEM_NOT_FOUND",
            Self::NotInHand(_) => "ACTION_NOT_IN_HAND",
            Self::NotOnField(_) => "ACTION_NOT_ON_FIELD",
            Self::NotYourTurn => "ACTION_NOT_YOUR_TURN",
            Self::FieldFull { .. } => "ACTION_FIELD_FULL",
            Self::AlreadyDefending(_) => "ACTION_ALREADY_DEFENDING",
            Self::InvalidTarget => "ACTION_INVALID_TARGET",
            Self::BattleOver { .. } => "ACTION_BATTLE_OVER",
        }
    }
}

impl From<EconomyError> for ActionError {
    fn from(err: EconomyError) -> Self {
        match err {
            EconomyError::Insufficient {
                required,
                available,
            } => Self::NotEnoughEnergy {
                required,
                available,
            },
        }
    }
}

/// Errors raised while building a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("duplicate creature id {0}")]
    DuplicateCreature(CreatureId),

    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),

    #[error("hand holds {size} creatures, cap is {cap}")]
    HandTooLarge { size: usize, cap: usize },

    #[error("{side} field holds {size} creatures, capacity is {cap}")]
    FieldTooLarge { side: Side, size: usize, cap: usize },

    #[error("creature {0} repeats a specialty")]
    DuplicateSpecialty(CreatureId),

    #[error("creature {id} has form {form} (max {max})", max = BattleConfig::MAX_FORM)]
    InvalidForm { id: CreatureId, form: u8 },
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCreature(_) => "SETUP_DUPLICATE_CREATURE",
            Self::DuplicateItem(_) => "SETUP_DUPLICATE_ITEM",
            Self::HandTooLarge { .. } => "SETUP_HAND_TOO_LARGE",
            Self::FieldTooLarge { .. } => "SETUP_FIELD_TOO_LARGE",
            Self::DuplicateSpecialty(_) => "SETUP_DUPLICATE_SPECIALTY",
            Self::InvalidForm { .. } => "SETUP_INVALID_FORM",
        }
    }
}
