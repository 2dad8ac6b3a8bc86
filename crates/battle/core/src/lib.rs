//! Deterministic battle rules shared by the runtime and headless tools.
//!
//! `battle-core` defines the canonical rules (stat derivation, effect ledger,
//! combat resolution, energy economy, turn engine) and exposes pure APIs: every
//! operation takes a [`BattleState`] value and returns a new one. Randomness is
//! injected through [`RngOracle`] so any battle can be replayed from its seed
//! and action history.
pub mod action;
pub mod combat;
pub mod config;
pub mod economy;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::BattleAction;
pub use combat::{
    AttackResolution, Channel, Effectiveness, EffectivenessLabel, SpellOutcome, ToolOutcome,
    apply_spell, apply_tool, defend, effect_power, effectiveness, estimate_damage,
    estimate_spell_damage, resolve_attack,
};
pub use config::{BattleConfig, Difficulty, DifficultyProfile};
pub use economy::EconomyError;
pub use effects::{
    ActiveEffect, ChargeProgress, EffectKind, Expiry, PowerLevel, TickScaling, attach,
    clear_defending, tick,
};
pub use engine::{ActionOutcome, OpponentConfig, SideSetup, execute, start_battle, submit_action};
pub use env::{FixedRng, PcgRng, RngOracle, Roller, compute_seed};
pub use error::{ActionError, BattleError, ErrorSeverity, SetupError};
pub use state::{
    BattleState, Creature, CreatureId, CreatureSpec, CreatureView, Item, ItemEffect, ItemId,
    LogEntry, Phase, Side, SideState, SideView,
};
pub use stats::{
    Attribute, BaseAttributes, CreatureProfile, DerivedStat, DerivedStats, Rarity, StatDelta,
    derive_stats,
};
