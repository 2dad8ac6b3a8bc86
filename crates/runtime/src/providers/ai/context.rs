//! Planning context for ladder generators.
//!
//! The [`PlanContext`] serves as the "blackboard" for one ladder step. It
//! provides:
//!
//! - Read access to the simulated board
//! - The per-turn rolls made by the planner
//! - Helper queries shared by several generators

use battle_core::{
    BattleState, Creature, CreatureId, DifficultyProfile, Side, SideState, estimate_damage,
};

use super::board::PlanBoard;
use super::scoring::deploy_value;

/// Context for one ladder step.
///
/// # Lifetime
///
/// Borrows the [`PlanBoard`] for the duration of a single step. The planner
/// rebuilds the context after every applied candidate so generators always
/// see the board as it will be after the actions planned so far.
pub struct PlanContext<'a> {
    /// The side being planned for.
    pub side: Side,

    /// Simulated board after the actions planned so far.
    pub state: &'a BattleState,

    /// Tuning of the battle, read from the state.
    pub profile: &'a DifficultyProfile,

    /// Enemy creatures already attacked by earlier steps this turn.
    pub targeted: &'a [CreatureId],

    /// Aggression roll for the turn (1-100).
    ///
    /// Compared against `aggression_floor_pct`: a roll at or under the floor
    /// forces the attack sequence regardless of board power.
    pub aggression_roll: u32,

    /// Index of the ladder step being evaluated.
    pub step: usize,
}

impl<'a> PlanContext<'a> {
    pub fn new(board: &'a PlanBoard, aggression_roll: u32, step: usize) -> Self {
        let state = board.state();
        Self {
            side: board.side(),
            state,
            profile: &state.profile,
            targeted: board.targeted(),
            aggression_roll,
            step,
        }
    }

    // ========================================================================
    // Board queries
    // ========================================================================

    pub fn own(&self) -> &'a SideState {
        self.state.side(self.side)
    }

    pub fn enemy(&self) -> &'a SideState {
        self.state.side(self.side.opposite())
    }

    pub fn energy(&self) -> u32 {
        self.own().energy
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.energy() >= cost
    }

    /// Own creatures able to attack; defending creatures hold their stance.
    pub fn attackers(&self) -> impl Iterator<Item = &'a Creature> + 'a {
        self.own().field.iter().filter(|c| !c.is_defending)
    }

    /// An attack is affordable and has both an attacker and a target.
    pub fn can_attack(&self) -> bool {
        self.can_afford(self.profile.attack_cost)
            && !self.enemy().field.is_empty()
            && self.attackers().next().is_some()
    }

    /// Attacks the current energy pays for.
    pub fn attack_budget(&self) -> u32 {
        self.energy() / self.profile.attack_cost.max(1)
    }

    /// Attacker with the highest expected damage against `target`.
    ///
    /// Ties keep the first attacker in field order.
    pub fn best_attacker_against(&self, target: &Creature) -> Option<(&'a Creature, u32)> {
        let mut best: Option<(&Creature, u32)> = None;
        for attacker in self.attackers() {
            let damage = estimate_damage(attacker, target);
            if best.is_none_or(|(_, top)| damage > top) {
                best = Some((attacker, damage));
            }
        }
        best
    }

    /// Own field power as a percentage of the opponent's.
    pub fn power_ratio_pct(&self) -> i64 {
        let own = self.own().field_power();
        let enemy = self.enemy().field_power();
        if enemy <= 0 {
            return if own > 0 { i64::MAX } else { 100 };
        }
        own * 100 / enemy
    }

    // ========================================================================
    // Deployment queries
    // ========================================================================

    pub fn has_field_room(&self) -> bool {
        self.own().field.len() < self.profile.field_capacity(self.side)
    }

    /// Own field is smaller than the opponent's.
    pub fn is_behind(&self) -> bool {
        self.own().field.len() < self.enemy().field.len()
    }

    /// The field is smaller than the opponent's or below the tier minimum.
    pub fn wants_presence(&self) -> bool {
        self.is_behind() || self.own().field.len() < self.profile.min_presence
    }

    /// Most valuable hand creature costing at most `budget`, with its value.
    pub fn best_deployment(&self, budget: u32) -> Option<(&'a Creature, i64)> {
        if !self.has_field_room() {
            return None;
        }
        let behind = self.is_behind();
        let mut best: Option<(&Creature, i64)> = None;
        for candidate in &self.own().hand {
            if deploy_cost(candidate) > budget {
                continue;
            }
            let value = deploy_value(candidate, &self.enemy().field, behind);
            tracing::debug!(
                "deploy candidate {} ({}) value {}",
                candidate.id.0,
                candidate.species_name,
                value
            );
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((candidate, value));
            }
        }
        best
    }
}

/// Energy the engine charges to deploy `creature`.
pub fn deploy_cost(creature: &Creature) -> u32 {
    creature.derived.energy_cost.max(1) as u32
}
