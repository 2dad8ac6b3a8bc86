//! Authoritative battle state.
//!
//! [`BattleState`] is a plain value: every engine call takes a state and
//! returns a new one. Runtime layers clone or query it but never mutate it
//! outside the engine.

pub mod creature;
pub mod item;
pub mod log;
pub mod side;

pub use creature::{Creature, CreatureId, CreatureSpec};
pub use item::{Item, ItemEffect, ItemId};
pub use log::LogEntry;
pub use side::SideState;

use crate::config::DifficultyProfile;
use crate::economy;

/// One of the two sides of a battle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }

    /// Stable actor id used to key planner rolls for this side.
    pub const fn actor_id(self) -> u32 {
        match self {
            Self::Player => u32::MAX - 1,
            Self::Opponent => u32::MAX,
        }
    }
}

/// Battle lifecycle phase. `Won` and `Lost` are from the player's view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Setup,
    Active,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Canonical snapshot of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub phase: Phase,
    /// Starts at 1; increments when play returns to the player.
    pub turn: u32,
    pub active_side: Side,
    pub player: SideState,
    pub opponent: SideState,
    pub log: Vec<LogEntry>,
    pub profile: DifficultyProfile,
    /// RNG seed fixed at battle start.
    pub seed: u64,
    /// Number of accepted actions so far.
    pub nonce: u64,
}

impl BattleState {
    /// Empty state in the `Setup` phase.
    pub fn new(profile: DifficultyProfile, seed: u64) -> Self {
        Self {
            phase: Phase::Setup,
            turn: 1,
            active_side: Side::Player,
            player: SideState::default(),
            opponent: SideState::default(),
            log: Vec::new(),
            profile,
            seed,
            nonce: 0,
        }
    }

    // ========================================================================
    // Projections
    // ========================================================================

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn field(&self, side: Side) -> &[Creature] {
        &self.side(side).field
    }

    pub fn hand(&self, side: Side) -> &[Creature] {
        &self.side(side).hand
    }

    pub fn energy(&self, side: Side) -> u32 {
        self.side(side).energy
    }

    pub fn max_energy(&self, side: Side) -> u32 {
        economy::max_energy(&self.profile, self.field(side).len())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Which side owns a creature currently on a field.
    pub fn field_owner(&self, id: CreatureId) -> Option<Side> {
        if self.player.field_creature(id).is_some() {
            Some(Side::Player)
        } else if self.opponent.field_creature(id).is_some() {
            Some(Side::Opponent)
        } else {
            None
        }
    }

    /// Compact read-only summary of one side.
    pub fn view(&self, side: Side) -> SideView {
        let state = self.side(side);
        SideView {
            side,
            field: state
                .field
                .iter()
                .map(|c| CreatureView {
                    id: c.id,
                    species_name: c.species_name.clone(),
                    current_health: c.current_health,
                    max_health: c.derived.max_health,
                    is_defending: c.is_defending,
                    effects: c.effects.len(),
                })
                .collect(),
            hand_size: state.hand.len(),
            deck_size: state.deck.len(),
            energy: state.energy,
            max_energy: self.max_energy(side),
            tools: state.tools.len(),
            spells: state.spells.len(),
        }
    }

    pub(crate) fn push_log(&mut self, message: impl Into<String>) {
        let turn = self.turn;
        self.log.push(LogEntry::new(turn, message));
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two states with equal digests are identical, which makes replay
    /// verification a single comparison.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

/// Read-only snapshot of a field creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureView {
    pub id: CreatureId,
    pub species_name: String,
    pub current_health: i32,
    pub max_health: i32,
    pub is_defending: bool,
    pub effects: usize,
}

/// Read-only snapshot of one side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideView {
    pub side: Side,
    pub field: Vec<CreatureView>,
    pub hand_size: usize,
    pub deck_size: usize,
    pub energy: u32,
    pub max_energy: u32,
    pub tools: usize,
    pub spells: usize,
}
