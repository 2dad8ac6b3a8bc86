//! Combat resolution.
//!
//! Pure functions resolving attacks, tools, spells and defensive stances.
//! Every function takes creatures by reference and returns updated copies;
//! the engine decides what to write back.
//!
//! # Core Functions
//!
//! - `resolve_attack`: dodge, effectiveness, critical, variance, mitigation
//! - `estimate_damage`: deterministic expectation used by the planner
//! - `apply_tool` / `apply_spell`: scaled item effects
//! - `defend`: defensive stance

pub mod attack;
pub mod damage;
pub mod defend;
pub mod effectiveness;
pub mod items;

pub use attack::{AttackResolution, resolve_attack};
pub use damage::{calculate_damage, estimate_damage, estimate_damage_on};
pub use defend::defend;
pub use effectiveness::{Channel, Effectiveness, EffectivenessLabel, effectiveness};
pub use items::{
    SpellOutcome, ToolOutcome, apply_spell, apply_tool, effect_power, estimate_spell_damage,
    spell_heals,
};
