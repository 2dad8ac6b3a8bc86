//! Difficulty tiers and battle tuning parameters.
//!
//! Every tier-dependent number in the rules (field and hand caps, energy
//! economy, effect power, planner aggression) lives in one immutable
//! [`DifficultyProfile`] record. The profile is stored in
//! [`crate::BattleState`] and handed to every component that needs it, so no
//! rule reads a hidden global.

use crate::state::Side;

/// Difficulty tier of a battle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Compile-time limits shared by every tier.
pub struct BattleConfig;

impl BattleConfig {
    /// A creature carries at most two specialty attributes.
    pub const MAX_SPECIALTIES: usize = 2;
    /// Highest evolution form.
    pub const MAX_FORM: u8 = 3;
    /// Upper bound for `critical_chance` (percent).
    pub const CRITICAL_CAP: i32 = 40;
    /// Upper bound for `dodge_chance` (percent).
    pub const DODGE_CAP: i32 = 25;
    /// Damage floor for a resolved hit.
    pub const MIN_DAMAGE: u32 = 2;
    /// Damage dealt when an attack cannot be resolved because stats are missing.
    pub const MISSING_STATS_DAMAGE: u32 = 3;
}

/// Tier-specific configuration record.
///
/// Percentages are integers (`120` = ×1.2). Use [`DifficultyProfile::for_tier`]
/// for the shipped tuning; hosts may deserialize a custom record instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyProfile {
    pub tier: Difficulty,

    // ===== board limits =====
    /// Field capacity for the player side.
    pub player_field_capacity: usize,
    /// Field capacity for the opponent side.
    pub opponent_field_capacity: usize,
    /// Hand cap for both sides (drawing stops at this size).
    pub max_hand_size: usize,

    // ===== energy economy =====
    pub starting_energy: u32,
    pub base_max_energy: u32,
    pub base_regen: u32,
    /// Extra regeneration granted to the opponent side only.
    pub opponent_regen_bonus: u32,
    pub attack_cost: u32,
    pub defend_cost: u32,
    pub spell_cost: u32,

    // ===== effect scaling =====
    /// Tier multiplier applied to tool and spell power.
    pub effect_power_pct: u32,
    /// Share of current defense granted by a defensive stance.
    pub defend_boost_pct: u32,
    /// Multiplier applied to per-tick health deltas.
    pub tick_health_pct: u32,

    // ===== opponent planner =====
    /// Chance that the opponent plans a multi-action turn.
    pub multi_action_pct: u32,
    /// Upper bound on actions in one planned turn (excluding `EndTurn`).
    pub max_plan_actions: usize,
    /// Lethal search accepts a target once estimated damage reaches this share of its health.
    pub lethal_margin_pct: u32,
    /// Attack when own power is at least this share of the opposing power.
    pub attack_threshold_pct: u32,
    /// Chance to attack regardless of the power comparison.
    pub aggression_floor_pct: u32,
    /// Health share under which a creature is defended as an emergency.
    pub emergency_health_pct: u32,
    /// Chance that a generator picks a random viable option instead of the best one.
    pub blunder_pct: u32,
    /// Minimum number of own creatures the planner tries to keep on the field.
    pub min_presence: usize,
    /// Turns projected by the lookahead generator (0 disables it).
    pub lookahead_turns: u32,
}

impl DifficultyProfile {
    pub const DEFAULT_STARTING_ENERGY: u32 = 12;
    pub const DEFAULT_PLAYER_FIELD_CAPACITY: usize = 3;

    /// Shipped tuning for a tier.
    pub fn for_tier(tier: Difficulty) -> Self {
        let base = Self {
            tier,
            player_field_capacity: Self::DEFAULT_PLAYER_FIELD_CAPACITY,
            opponent_field_capacity: 4,
            max_hand_size: 5,
            starting_energy: Self::DEFAULT_STARTING_ENERGY,
            base_max_energy: 20,
            base_regen: 4,
            opponent_regen_bonus: 1,
            attack_cost: 2,
            defend_cost: 1,
            spell_cost: 4,
            effect_power_pct: 100,
            defend_boost_pct: 60,
            tick_health_pct: 100,
            multi_action_pct: 50,
            max_plan_actions: 6,
            lethal_margin_pct: 95,
            attack_threshold_pct: 100,
            aggression_floor_pct: 40,
            emergency_health_pct: 30,
            blunder_pct: 15,
            min_presence: 2,
            lookahead_turns: 0,
        };

        match tier {
            Difficulty::Easy => Self {
                opponent_field_capacity: 3,
                max_hand_size: 6,
                base_max_energy: 18,
                base_regen: 3,
                opponent_regen_bonus: 0,
                effect_power_pct: 90,
                defend_boost_pct: 50,
                multi_action_pct: 30,
                max_plan_actions: 4,
                lethal_margin_pct: 100,
                attack_threshold_pct: 120,
                aggression_floor_pct: 20,
                emergency_health_pct: 25,
                blunder_pct: 35,
                min_presence: 1,
                ..base
            },
            Difficulty::Medium => base,
            Difficulty::Hard => Self {
                opponent_field_capacity: 5,
                max_hand_size: 4,
                base_max_energy: 22,
                base_regen: 5,
                opponent_regen_bonus: 2,
                effect_power_pct: 120,
                defend_boost_pct: 70,
                tick_health_pct: 130,
                multi_action_pct: 70,
                max_plan_actions: 8,
                lethal_margin_pct: 90,
                attack_threshold_pct: 85,
                aggression_floor_pct: 60,
                blunder_pct: 0,
                ..base
            },
            Difficulty::Expert => Self {
                opponent_field_capacity: 6,
                max_hand_size: 4,
                base_max_energy: 25,
                base_regen: 6,
                opponent_regen_bonus: 3,
                effect_power_pct: 140,
                defend_boost_pct: 80,
                tick_health_pct: 150,
                multi_action_pct: 90,
                max_plan_actions: 10,
                lethal_margin_pct: 90,
                attack_threshold_pct: 70,
                aggression_floor_pct: 80,
                emergency_health_pct: 35,
                blunder_pct: 0,
                min_presence: 3,
                lookahead_turns: 3,
                ..base
            },
        }
    }

    /// Field capacity for the given side.
    pub fn field_capacity(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_field_capacity,
            Side::Opponent => self.opponent_field_capacity,
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::for_tier(Difficulty::default())
    }
}
