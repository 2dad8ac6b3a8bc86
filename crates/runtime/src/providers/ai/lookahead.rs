//! Expected-exchange projection used by the expert ladder.
//!
//! Both sides trade their best expected hit as often as their energy allows,
//! starting with the planning side. After `turns` exchanges (or as soon as a
//! health pool runs dry) the remaining pools decide the stance.
//!
//! # Formula
//!
//! ```text
//! attacks(turn 0) = energy / attack_cost
//! attacks(turn n) = regen / attack_cost
//! pool           -= attacks × best expected hit
//! ```

use battle_core::economy;
use battle_core::{Creature, Side, SideState, estimate_damage};

use super::context::PlanContext;
use super::types::Stance;

/// Difference in remaining health share (percentage points) that tips the
/// stance one way or the other.
pub const STANCE_MARGIN_PCT: i64 = 20;

/// Result of a projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    pub stance: Stance,
    /// Own field health left at the end of the projection.
    pub own_health: i64,
    pub enemy_health: i64,
    /// Exchanges actually simulated.
    pub turns: u32,
}

/// Project `turns` exchanges from the board in `ctx`.
pub fn project(ctx: &PlanContext<'_>, turns: u32) -> Projection {
    let own = ctx.own();
    let enemy = ctx.enemy();
    let own_start = pool(own);
    let enemy_start = pool(enemy);

    let mut projection = Projection {
        stance: Stance::Hold,
        own_health: own_start,
        enemy_health: enemy_start,
        turns: 0,
    };
    if own.field.is_empty() {
        projection.stance = Stance::Fortify;
        return projection;
    }
    if enemy.field.is_empty() {
        return projection;
    }

    let cost = ctx.profile.attack_cost.max(1) as i64;
    let own_hit = best_hit(ctx.attackers(), &enemy.field);
    let enemy_hit = best_hit(enemy.field.iter(), &own.field);
    let own_regen = economy::regen(own, ctx.profile, ctx.side == Side::Opponent) as i64;
    let enemy_regen = economy::regen(enemy, ctx.profile, ctx.side == Side::Player) as i64;
    let enemy_max = ctx.state.max_energy(ctx.side.opposite()) as i64;

    for turn in 0..turns {
        projection.turns = turn + 1;

        let own_attacks = if turn == 0 {
            ctx.energy() as i64 / cost
        } else {
            own_regen / cost
        };
        projection.enemy_health -= own_attacks * own_hit;
        if projection.enemy_health <= 0 {
            projection.stance = Stance::Aggressive;
            return projection;
        }

        let enemy_attacks = if turn == 0 {
            (enemy.energy as i64 + enemy_regen).min(enemy_max) / cost
        } else {
            enemy_regen / cost
        };
        projection.own_health -= enemy_attacks * enemy_hit;
        if projection.own_health <= 0 {
            projection.stance = Stance::Fortify;
            return projection;
        }
    }

    let own_share = projection.own_health * 100 / own_start.max(1);
    let enemy_share = projection.enemy_health * 100 / enemy_start.max(1);
    projection.stance = if own_share >= enemy_share + STANCE_MARGIN_PCT {
        Stance::Aggressive
    } else if own_share + STANCE_MARGIN_PCT <= enemy_share {
        Stance::Fortify
    } else {
        Stance::Hold
    };
    projection
}

fn pool(side: &SideState) -> i64 {
    side.field.iter().map(|c| c.current_health.max(0) as i64).sum()
}

fn best_hit<'c>(attackers: impl Iterator<Item = &'c Creature>, targets: &[Creature]) -> i64 {
    attackers
        .flat_map(|attacker| targets.iter().map(move |t| estimate_damage(attacker, t)))
        .max()
        .unwrap_or(0) as i64
}
