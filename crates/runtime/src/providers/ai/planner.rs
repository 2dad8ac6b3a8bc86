//! Opponent turn planner.

use battle_core::env::rng::context;
use battle_core::{BattleAction, BattleState, Difficulty, RngOracle, Roller, Side};

use super::board::PlanBoard;
use super::context::PlanContext;
use super::generators;
use super::types::{Candidate, Generator, PlanStep, TurnPlan};
use crate::providers::TurnProvider;

/// A named ladder step.
pub type Rung = (&'static str, Generator);

const EMERGENCY: Rung = ("emergency_defense", generators::emergency_defense);
const LETHAL: Rung = ("lethal_search", generators::lethal_search);
const LOOKAHEAD: Rung = ("lookahead", generators::lookahead_play);
const ITEMS: Rung = ("item_play", generators::item_play);
const AGGRESSION: Rung = ("aggressive_attacks", generators::aggressive_attacks);
const DEPLOYMENT: Rung = ("strategic_deployment", generators::strategic_deployment);
const CLEANUP: Rung = ("cleanup", generators::cleanup);
const END_TURN: Rung = ("end_turn", generators::end_turn);

const BASIC_LADDER: [Rung; 6] = [EMERGENCY, LETHAL, AGGRESSION, DEPLOYMENT, CLEANUP, END_TURN];
const HARD_LADDER: [Rung; 7] = [
    EMERGENCY, LETHAL, ITEMS, AGGRESSION, DEPLOYMENT, CLEANUP, END_TURN,
];
const EXPERT_LADDER: [Rung; 8] = [
    EMERGENCY, LETHAL, LOOKAHEAD, ITEMS, AGGRESSION, DEPLOYMENT, CLEANUP, END_TURN,
];

/// Ladder-driven planner for a whole turn.
///
/// The planner:
/// 1. Rolls once per turn for multi-action play and aggression
/// 2. Builds a [`PlanContext`] over a simulated [`PlanBoard`]
/// 3. Walks the tier's ladder and takes the first candidate whose score is
///    possible (or, on a blunder roll, a random possible one)
/// 4. Applies the chosen actions to the board and repeats while the
///    action budget allows
/// 5. Terminates the plan with `EndTurn`
///
/// Every roll is keyed by the battle seed and nonce, so the same state and
/// oracle always produce the same plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentPlanner;

impl OpponentPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Ordered generators for a difficulty tier.
    pub fn ladder(tier: Difficulty) -> &'static [Rung] {
        match tier {
            Difficulty::Easy | Difficulty::Medium => &BASIC_LADDER,
            Difficulty::Hard => &HARD_LADDER,
            Difficulty::Expert => &EXPERT_LADDER,
        }
    }

    /// Plan `side`'s turn on `state`.
    ///
    /// # Returns
    ///
    /// An ordered action list that always ends with `EndTurn`. When `side`
    /// cannot act the plan is `EndTurn` alone.
    pub fn plan_turn(&self, state: &BattleState, side: Side, rng: &dyn RngOracle) -> TurnPlan {
        let mut board = PlanBoard::new(state, side);
        if !board.is_open() {
            tracing::warn!("{side} asked to plan outside its turn, ending turn");
            return TurnPlan::end_turn();
        }

        let profile = &state.profile;
        let roller = Roller::new(rng, state.seed, state.nonce);
        let actor = side.actor_id();
        let multi_action = roller.chance(actor, context::PLAN_MULTI_ACTION, profile.multi_action_pct);
        let aggression_roll = roller.range(actor, context::PLAN_AGGRESSION, 1, 100);
        let budget = if multi_action {
            profile.max_plan_actions.max(1)
        } else {
            1
        };
        let ladder = Self::ladder(profile.tier);

        tracing::debug!(
            "{side} planning turn {} on {} (multi-action: {multi_action}, aggression roll: {aggression_roll})",
            state.turn,
            profile.tier
        );

        let mut actions = Vec::new();
        let mut steps = Vec::new();
        let mut step = 0;
        while actions.len() < budget && board.is_open() {
            let ctx = PlanContext::new(&board, aggression_roll, step);
            let Some((name, candidate, blundered)) =
                choose(ladder, &ctx, &roller, actor, profile.blunder_pct)
            else {
                break;
            };

            let Candidate {
                score,
                actions: mut chosen,
                terminal,
            } = candidate;
            if chosen.first().is_none_or(BattleAction::is_end_turn) {
                steps.push(PlanStep {
                    generator: name.to_string(),
                    score: score.value(),
                    actions: 0,
                    blundered,
                });
                break;
            }
            if !terminal {
                chosen.truncate(budget - actions.len());
            }

            let mut applied = 0;
            for action in chosen {
                if !board.apply(&action) {
                    tracing::debug!("{name}: {action} rejected on the plan board, dropping the rest");
                    break;
                }
                actions.push(action);
                applied += 1;
            }
            steps.push(PlanStep {
                generator: name.to_string(),
                score: score.value(),
                actions: applied,
                blundered,
            });
            if applied == 0 || terminal {
                break;
            }
            step += 1;
        }

        actions.push(BattleAction::EndTurn);
        tracing::debug!("{side} planned {} action(s)", actions.len());
        TurnPlan {
            actions,
            multi_action,
            steps,
        }
    }
}

impl TurnProvider for OpponentPlanner {
    fn plan_turn(&self, state: &BattleState, side: Side, rng: &dyn RngOracle) -> TurnPlan {
        OpponentPlanner::plan_turn(self, state, side, rng)
    }
}

/// First possible candidate in ladder order, or a random possible one on a
/// blunder.
fn choose(
    ladder: &[Rung],
    ctx: &PlanContext<'_>,
    roller: &Roller<'_>,
    actor: u32,
    blunder_pct: u32,
) -> Option<(&'static str, Candidate, bool)> {
    let roll_context = context::PLAN_STEP + 2 * ctx.step as u32;
    let blunder = blunder_pct > 0 && roller.chance(actor, roll_context, blunder_pct);

    if !blunder {
        for &(name, generate) in ladder {
            match generate(ctx) {
                Some(candidate) if candidate.score.is_possible => {
                    tracing::debug!(
                        "step {}: {name} proposes {} action(s) (score: {})",
                        ctx.step,
                        candidate.actions.len(),
                        candidate.score.value()
                    );
                    return Some((name, candidate, false));
                }
                _ => tracing::debug!("step {}: {name} has no candidate", ctx.step),
            }
        }
        return None;
    }

    let mut viable: Vec<(&'static str, Candidate)> = ladder
        .iter()
        .filter_map(|&(name, generate)| {
            generate(ctx)
                .filter(|c| c.score.is_possible)
                .map(|c| (name, c))
        })
        .collect();
    if viable.is_empty() {
        return None;
    }
    let index = roller.pick(actor, roll_context + 1, viable.len());
    let (name, candidate) = viable.swap_remove(index);
    tracing::debug!(
        "step {}: blunder picks {name} out of {} option(s)",
        ctx.step,
        viable.len() + 1
    );
    Some((name, candidate, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BaseAttributes, CreatureId, CreatureProfile, CreatureSpec, DifficultyProfile, FixedRng,
        OpponentConfig, PcgRng, SideSetup, start_battle,
    };
    use strum::IntoEnumIterator;

    fn spec(id: u32) -> CreatureSpec {
        CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        )
    }

    fn opponent_turn(
        tier: Difficulty,
        own: Vec<CreatureSpec>,
        enemy: Vec<CreatureSpec>,
    ) -> BattleState {
        let player = SideSetup {
            field: enemy,
            hand: vec![spec(90)],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            profile: DifficultyProfile::for_tier(tier),
            setup: SideSetup {
                field: own,
                hand: vec![spec(91)],
                ..SideSetup::default()
            },
        };
        let mut state = match start_battle(player, opponent, 17) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        };
        state.active_side = Side::Opponent;
        state
    }

    #[test]
    fn lethal_attack_is_preferred_over_deploy_and_defend() {
        // thin own field wants a deployment and the stance is affordable, but
        // one hit clears the player's field
        let mut state = opponent_turn(Difficulty::Medium, vec![spec(10)], vec![spec(1)]);
        state.player.field[0].current_health = 20;

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &FixedRng::NEUTRAL);
        assert_eq!(
            plan.actions,
            vec![
                BattleAction::Attack {
                    attacker: CreatureId(10),
                    defender: CreatureId(1),
                },
                BattleAction::EndTurn,
            ]
        );
        assert_eq!(plan.steps[0].generator, "lethal_search");
        assert!(!plan.steps[0].blundered);
    }

    #[test]
    fn single_action_turn_keeps_the_first_attack() {
        // d100 rolls 100: no multi-action, no blunder, no aggression roll
        let state = opponent_turn(
            Difficulty::Medium,
            vec![spec(10), spec(11)],
            vec![spec(1), spec(2)],
        );

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &FixedRng(99));
        assert!(!plan.multi_action);
        assert_eq!(plan.actions.len(), 2);
        assert!(matches!(plan.actions[0], BattleAction::Attack { .. }));
        assert_eq!(plan.steps[0].generator, "aggressive_attacks");
    }

    #[test]
    fn endangered_creature_defends_first() {
        let mut state = opponent_turn(Difficulty::Hard, vec![spec(10)], vec![spec(1), spec(2)]);
        state.opponent.field[0].current_health = 10;

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &FixedRng(99));
        assert_eq!(
            plan.actions[0],
            BattleAction::Defend {
                creature: CreatureId(10)
            }
        );
    }

    #[test]
    fn endangered_last_attacker_defends_instead_of_finishing() {
        // emergency defense outranks lethal, and a defending creature
        // cannot attack for the rest of the turn
        let mut state = opponent_turn(Difficulty::Medium, vec![spec(10)], vec![spec(1)]);
        state.player.field[0].current_health = 5;
        state.opponent.field[0].current_health = 10;

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &FixedRng::NEUTRAL);
        assert_eq!(
            plan.actions[0],
            BattleAction::Defend {
                creature: CreatureId(10)
            }
        );
        assert_eq!(plan.steps[0].generator, "emergency_defense");
        assert!(!plan.actions.iter().any(|a| matches!(
            a,
            BattleAction::Attack {
                attacker: CreatureId(10),
                ..
            }
        )));
    }

    #[test]
    fn unaffordable_candidates_are_passed_over() {
        let mut state = opponent_turn(Difficulty::Medium, vec![spec(10)], vec![spec(1)]);
        state.opponent.field[0].current_health = 10;
        state.opponent.energy = 0;

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &FixedRng::NEUTRAL);
        assert_eq!(plan.actions, vec![BattleAction::EndTurn]);
        assert!(plan.steps.iter().all(|s| s.generator == "end_turn"));
    }

    #[test]
    fn planning_outside_the_turn_only_ends_it() {
        let mut state = opponent_turn(Difficulty::Easy, vec![spec(10)], vec![spec(1)]);
        state.active_side = Side::Player;

        let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &PcgRng);
        assert_eq!(plan, TurnPlan::end_turn());
    }

    #[test]
    fn every_tier_plan_ends_with_a_single_end_turn() {
        let boards = [
            (vec![spec(10)], vec![spec(1)]),
            (vec![spec(10), spec(11)], vec![spec(1), spec(2), spec(3)]),
            (Vec::new(), vec![spec(1)]),
            (vec![spec(10)], Vec::new()),
        ];

        for tier in Difficulty::iter() {
            for (own, enemy) in &boards {
                for seed in 0..8 {
                    let mut state = opponent_turn(tier, own.clone(), enemy.clone());
                    state.seed = seed;
                    let plan = OpponentPlanner::new().plan_turn(&state, Side::Opponent, &PcgRng);

                    assert_eq!(plan.actions.last(), Some(&BattleAction::EndTurn));
                    let end_turns = plan.actions.iter().filter(|a| a.is_end_turn()).count();
                    assert_eq!(end_turns, 1, "{tier} seed {seed}: {:?}", plan.actions);
                    let terminal = plan.steps.iter().any(|s| s.generator == "lethal_search");
                    if !terminal {
                        assert!(plan.actions.len() <= state.profile.max_plan_actions + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn ladders_grow_with_the_tier() {
        let names = |tier| -> Vec<&'static str> {
            OpponentPlanner::ladder(tier)
                .iter()
                .map(|(name, _)| *name)
                .collect()
        };

        assert!(!names(Difficulty::Medium).contains(&"item_play"));
        assert!(names(Difficulty::Hard).contains(&"item_play"));
        assert!(!names(Difficulty::Hard).contains(&"lookahead"));
        assert_eq!(names(Difficulty::Expert)[2], "lookahead");
        for tier in Difficulty::iter() {
            assert_eq!(names(tier).last(), Some(&"end_turn"));
        }
    }
}
