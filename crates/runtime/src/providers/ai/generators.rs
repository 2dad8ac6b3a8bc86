//! Candidate generators, one per ladder step.
//!
//! Each generator is a pure function of the [`PlanContext`]: it either
//! proposes actions with a [`Score`] or declines with `None`. The planner
//! walks them in ladder order and takes the first proposal whose score is
//! possible; a proposal the side cannot pay for is returned with
//! `is_possible` unset so the ladder moves on.
//!
//! | Generator              | Fires when                                         |
//! |------------------------|----------------------------------------------------|
//! | `emergency_defense`    | own creature under the emergency health threshold  |
//! | `lethal_search`        | the attack budget clears the opposing field        |
//! | `lookahead_play`       | expert projection is decisive                      |
//! | `item_play`            | a spell finishes a target, or a tool saves an ally |
//! | `aggressive_attacks`   | power, a weak target or the aggression roll        |
//! | `strategic_deployment` | field smaller than the opponent's or the minimum   |
//! | `cleanup`              | anything left to hit or protect                    |
//! | `end_turn`             | always                                             |

use battle_core::{
    Attribute, BattleAction, Creature, ItemEffect, effect_power, estimate_spell_damage,
};

use super::context::{PlanContext, deploy_cost};
use super::lookahead;
use super::scoring::{PairScore, Score, defend_priority, pair_score, stakes_pct, threat};
use super::types::{Candidate, Stance};

/// Opposing creatures under this health share invite an attack sequence.
pub const FINISHING_HEALTH_PCT: i64 = 30;

/// Own creatures under this health share are worth a restorative tool.
pub const WOUNDED_HEALTH_PCT: i64 = 50;

// ============================================================================
// 1. Emergency defense
// ============================================================================

/// Defend the most endangered creature below the emergency threshold.
pub fn emergency_defense(ctx: &PlanContext<'_>) -> Option<Candidate> {
    if ctx.enemy().field.is_empty() {
        return None;
    }
    let threshold = ctx.profile.emergency_health_pct as i64;
    let endangered = ctx
        .own()
        .field
        .iter()
        .filter(|c| !c.is_defending && c.health_pct() < threshold)
        .min_by_key(|c| c.health_pct())?;

    let missing = (100 - endangered.health_pct()).clamp(0, 100) as u32;
    Some(Candidate::single(
        Score::new(ctx.can_afford(ctx.profile.defend_cost), missing, 100, 100),
        BattleAction::Defend {
            creature: endangered.id,
        },
    ))
}

// ============================================================================
// 2. Lethal search
// ============================================================================

/// Clear the opposing field this turn, if the attack budget allows.
///
/// Targets are taken in ascending health, each hit by its best attacker
/// until the expected damage covers `health × lethal_margin_pct`.
pub fn lethal_search(ctx: &PlanContext<'_>) -> Option<Candidate> {
    if !ctx.can_attack() {
        return None;
    }

    let mut targets: Vec<&Creature> = ctx.enemy().field.iter().collect();
    targets.sort_by_key(|c| c.current_health);

    let margin = ctx.profile.lethal_margin_pct as i64;
    let mut budget = ctx.attack_budget();
    let mut actions = Vec::new();
    for target in targets {
        let (attacker, damage) = ctx.best_attacker_against(target)?;
        if damage == 0 {
            return None;
        }
        let needed = (target.current_health.max(0) as i64 * margin + 99) / 100;
        let mut dealt = 0;
        while dealt < needed {
            if budget == 0 {
                return None;
            }
            budget -= 1;
            dealt += damage as i64;
            actions.push(BattleAction::Attack {
                attacker: attacker.id,
                defender: target.id,
            });
        }
    }
    if actions.is_empty() {
        return None;
    }

    tracing::debug!("lethal found with {} attacks", actions.len());
    Some(Candidate::sequence(Score::certain(), actions).terminal())
}

// ============================================================================
// 3. Lookahead (expert)
// ============================================================================

/// Commit to the stance the projected exchange calls for.
pub fn lookahead_play(ctx: &PlanContext<'_>) -> Option<Candidate> {
    let turns = ctx.profile.lookahead_turns;
    if turns == 0 {
        return None;
    }
    let projection = lookahead::project(ctx, turns);
    tracing::debug!(
        "lookahead over {} turns: {} (own {}, enemy {})",
        projection.turns,
        projection.stance,
        projection.own_health,
        projection.enemy_health
    );

    match projection.stance {
        Stance::Aggressive => {
            if !ctx.can_attack() {
                return None;
            }
            let actions = attack_sequence(ctx, 0);
            (!actions.is_empty()).then(|| Candidate::sequence(Score::certain(), actions))
        }
        Stance::Fortify => fortify(ctx),
        Stance::Hold => None,
    }
}

/// Deploy the best affordable creature, then defend the most valuable one.
fn fortify(ctx: &PlanContext<'_>) -> Option<Candidate> {
    let mut actions = Vec::new();
    let mut energy = ctx.energy();

    if let Some((creature, _)) = ctx.best_deployment(energy) {
        energy -= deploy_cost(creature);
        actions.push(BattleAction::Deploy {
            creature: creature.id,
        });
    }
    if energy >= ctx.profile.defend_cost && !ctx.enemy().field.is_empty() {
        if let Some(defender) = most_valuable_defender(ctx) {
            actions.push(BattleAction::Defend {
                creature: defender.id,
            });
        }
    }

    (!actions.is_empty()).then(|| Candidate::sequence(Score::new(true, 80, 100, 100), actions))
}

// ============================================================================
// 4. Item play (hard, expert)
// ============================================================================

/// A finishing damage spell or a restorative tool on a wounded ally,
/// whichever scores higher. Ties go to the spell.
pub fn item_play(ctx: &PlanContext<'_>) -> Option<Candidate> {
    higher_score(finishing_spell(ctx), restorative_tool(ctx))
}

/// The possible candidate with the greater value, preferring `first`.
fn higher_score(first: Option<Candidate>, second: Option<Candidate>) -> Option<Candidate> {
    match (first, second) {
        (Some(a), Some(b)) => {
            let rank = |c: &Candidate| (c.score.is_possible, c.score.value());
            Some(if rank(&b) > rank(&a) { b } else { a })
        }
        (a, b) => a.or(b),
    }
}

/// Spell that kills the most threatening target it can reach.
///
/// Scored `100 × 90 × stakes(target)`; unaffordable spells are proposed
/// as impossible.
fn finishing_spell(ctx: &PlanContext<'_>) -> Option<Candidate> {
    let own = ctx.own();

    let mut best: Option<(i64, &Creature, BattleAction)> = None;
    for spell in &own.spells {
        for caster in &own.field {
            let power = effect_power(ctx.profile.effect_power_pct, spell, Some(caster));
            let damage = estimate_spell_damage(caster, spell, power) as i64;
            if damage == 0 {
                continue;
            }
            for target in &ctx.enemy().field {
                if damage < target.current_health as i64 {
                    continue;
                }
                let value = threat(target);
                if best.as_ref().is_none_or(|(top, _, _)| value > *top) {
                    best = Some((
                        value,
                        target,
                        BattleAction::UseSpell {
                            spell: spell.id,
                            caster: caster.id,
                            target: Some(target.id),
                        },
                    ));
                }
            }
        }
    }

    let affordable = ctx.can_afford(ctx.profile.spell_cost);
    best.map(|(_, target, action)| {
        Candidate::single(Score::new(affordable, 100, 90, stakes_pct(target)), action)
    })
}

fn restorative_tool(ctx: &PlanContext<'_>) -> Option<Candidate> {
    let own = ctx.own();
    let tool = own
        .tools
        .iter()
        .find(|t| t.effect == ItemEffect::Shield || t.item_type == Attribute::Stamina)?;
    let target = own
        .field
        .iter()
        .filter(|c| c.health_pct() < WOUNDED_HEALTH_PCT)
        .min_by_key(|c| c.health_pct())?;

    let missing = (100 - target.health_pct()).clamp(0, 100) as u32;
    Some(Candidate::single(
        Score::new(true, missing, 80, stakes_pct(target)),
        BattleAction::UseTool {
            tool: tool.id,
            target: target.id,
        },
    ))
}

// ============================================================================
// 5. Aggressive attack sequence
// ============================================================================

/// Greedy attack sequence, keeping energy back for a warranted deployment.
pub fn aggressive_attacks(ctx: &PlanContext<'_>) -> Option<Candidate> {
    if !ctx.can_attack() {
        return None;
    }
    let ratio = ctx.power_ratio_pct();
    let strong = ratio >= ctx.profile.attack_threshold_pct as i64;
    let finishing = ctx
        .enemy()
        .field
        .iter()
        .any(|c| c.health_pct() < FINISHING_HEALTH_PCT);
    let rolled = ctx.aggression_roll <= ctx.profile.aggression_floor_pct;
    if !(strong || finishing || rolled) {
        return None;
    }

    let reserve = if ctx.wants_presence() {
        ctx.best_deployment(ctx.energy())
            .map_or(0, |(creature, _)| deploy_cost(creature))
    } else {
        0
    };
    let actions = attack_sequence(ctx, reserve);
    if actions.is_empty() {
        return None;
    }

    let situation = ratio.clamp(0, 100) as u32;
    Some(Candidate::sequence(
        Score::new(true, situation, ctx.profile.aggression_floor_pct, 100),
        actions,
    ))
}

/// Pick attacker/target pairs greedily by pair score until the budget left
/// after `reserve` runs out.
fn attack_sequence(ctx: &PlanContext<'_>, reserve: u32) -> Vec<BattleAction> {
    let cost = ctx.profile.attack_cost.max(1);
    let mut budget = ctx.energy().saturating_sub(reserve) / cost;
    let attackers: Vec<&Creature> = ctx.attackers().collect();
    let mut remaining: Vec<(&Creature, i32)> = ctx
        .enemy()
        .field
        .iter()
        .map(|c| (c, c.current_health))
        .collect();

    let mut actions = Vec::new();
    while budget > 0 {
        let mut best: Option<(PairScore, usize)> = None;
        for (index, &(target, health)) in remaining.iter().enumerate() {
            if health <= 0 {
                continue;
            }
            for attacker in &attackers {
                let pair = pair_score(attacker, target, health);
                tracing::debug!(
                    "pair {} -> {}: damage {} value {}",
                    pair.attacker.0,
                    pair.target.0,
                    pair.damage,
                    pair.value
                );
                if best.is_none_or(|(top, _)| pair.value > top.value) {
                    best = Some((pair, index));
                }
            }
        }
        let Some((pair, index)) = best else {
            break;
        };
        remaining[index].1 -= pair.damage as i32;
        budget -= 1;
        actions.push(BattleAction::Attack {
            attacker: pair.attacker,
            defender: pair.target,
        });
    }
    actions
}

// ============================================================================
// 6. Strategic deployment
// ============================================================================

/// Deploy the best-value affordable creature when the field is thin.
pub fn strategic_deployment(ctx: &PlanContext<'_>) -> Option<Candidate> {
    if !ctx.wants_presence() {
        return None;
    }
    let (creature, _) = ctx.best_deployment(ctx.energy())?;
    let situation = if ctx.is_behind() { 100 } else { 70 };
    Some(Candidate::single(
        Score::new(true, situation, 100, 100),
        BattleAction::Deploy {
            creature: creature.id,
        },
    ))
}

// ============================================================================
// 7. Cleanup
// ============================================================================

/// Hit an opposing creature nobody targeted yet, else protect the most
/// valuable creature still exposed.
pub fn cleanup(ctx: &PlanContext<'_>) -> Option<Candidate> {
    if ctx.can_attack() {
        let untargeted = ctx
            .enemy()
            .field
            .iter()
            .filter(|c| !ctx.targeted.contains(&c.id))
            .min_by_key(|c| c.current_health);
        if let Some(target) = untargeted {
            if let Some((attacker, _)) = ctx.best_attacker_against(target) {
                return Some(Candidate::single(
                    Score::new(true, 60, 100, 100),
                    BattleAction::Attack {
                        attacker: attacker.id,
                        defender: target.id,
                    },
                ));
            }
        }
    }

    if ctx.enemy().field.is_empty() {
        return None;
    }
    let defender = most_valuable_defender(ctx)?;
    Some(Candidate::single(
        Score::new(ctx.can_afford(ctx.profile.defend_cost), 40, 100, 100),
        BattleAction::Defend {
            creature: defender.id,
        },
    ))
}

/// Highest defend priority among creatures not yet defending.
fn most_valuable_defender<'a>(ctx: &PlanContext<'a>) -> Option<&'a Creature> {
    let mut best: Option<(&Creature, i64)> = None;
    for creature in ctx.own().field.iter().filter(|c| !c.is_defending) {
        let priority = defend_priority(creature);
        if best.is_none_or(|(_, top)| priority > top) {
            best = Some((creature, priority));
        }
    }
    best.map(|(creature, _)| creature)
}

// ============================================================================
// 8. End turn
// ============================================================================

/// Always available.
pub fn end_turn(_ctx: &PlanContext<'_>) -> Option<Candidate> {
    Some(Candidate::single(
        Score::new(true, 10, 100, 100),
        BattleAction::EndTurn,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ai::board::PlanBoard;
    use battle_core::{
        BaseAttributes, BattleState, CreatureId, CreatureProfile, CreatureSpec, Item, ItemId,
        OpponentConfig, Rarity, Side, SideSetup, start_battle,
    };

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

    /// Opponent to act, with `own` on its field and `enemy` on the player's.
    fn board(own: Vec<CreatureSpec>, enemy: Vec<CreatureSpec>) -> BattleState {
        let player = SideSetup {
            field: enemy,
            hand: vec![spec(90)],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            setup: SideSetup {
                field: own,
                hand: vec![spec(91)],
                ..SideSetup::default()
            },
            ..OpponentConfig::default()
        };
        let mut state = match start_battle(player, opponent, 21) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        };
        state.active_side = Side::Opponent;
        state
    }

    fn with_ctx<T>(state: &BattleState, f: impl FnOnce(&PlanContext<'_>) -> T) -> T {
        let board = PlanBoard::new(state, Side::Opponent);
        let ctx = PlanContext::new(&board, 100, 0);
        f(&ctx)
    }

    #[test]
    fn emergency_defense_protects_the_weakest() {
        let mut state = board(vec![spec(10), spec(11)], vec![spec(1)]);
        state.opponent.field[0].current_health = 30;
        state.opponent.field[1].current_health = 10;

        let candidate = with_ctx(&state, emergency_defense);
        assert_eq!(
            candidate.map(|c| c.actions),
            Some(vec![BattleAction::Defend {
                creature: CreatureId(11)
            }])
        );
    }

    #[test]
    fn lethal_needs_the_whole_field() {
        let mut state = board(vec![spec(10)], vec![spec(1), spec(2)]);
        state.opponent.energy = 10;
        state.player.field[0].current_health = 5;

        // one attack for the weak target, five more for the healthy one
        assert!(with_ctx(&state, lethal_search).is_none());

        state.player.field[1].current_health = 5;
        let Some(candidate) = with_ctx(&state, lethal_search) else {
            panic!("two weak targets should be lethal");
        };
        assert!(candidate.terminal);
        assert_eq!(candidate.actions.len(), 2);
    }

    #[test]
    fn finishing_spell_targets_a_killable_enemy() {
        let mut state = board(vec![spec(10)], vec![spec(1)]);
        state.player.field[0].current_health = 10;
        state.opponent.spells.push(Item::new(
            50,
            "Fireball",
            Attribute::Strength,
            ItemEffect::Surge,
            Rarity::Common,
        ));

        let candidate = with_ctx(&state, item_play);
        assert_eq!(
            candidate.map(|c| c.actions),
            Some(vec![BattleAction::UseSpell {
                spell: ItemId(50),
                caster: CreatureId(10),
                target: Some(CreatureId(1)),
            }])
        );
    }

    #[test]
    fn restorative_tool_goes_to_the_wounded() {
        let mut state = board(vec![spec(10), spec(11)], vec![spec(1)]);
        state.opponent.field[1].current_health = 20;
        state.opponent.tools.push(Item::new(
            60,
            "Bandage",
            Attribute::Stamina,
            ItemEffect::Echo,
            Rarity::Common,
        ));

        let candidate = with_ctx(&state, item_play);
        assert_eq!(
            candidate.map(|c| c.actions),
            Some(vec![BattleAction::UseTool {
                tool: ItemId(60),
                target: CreatureId(11),
            }])
        );
    }

    fn legendary(id: u32) -> CreatureSpec {
        let mut legend = spec(id);
        legend.profile.rarity = Rarity::Legendary;
        legend
    }

    fn fireball() -> Item {
        Item::new(
            50,
            "Fireball",
            Attribute::Strength,
            ItemEffect::Surge,
            Rarity::Common,
        )
    }

    fn bandage() -> Item {
        Item::new(
            60,
            "Bandage",
            Attribute::Stamina,
            ItemEffect::Echo,
            Rarity::Common,
        )
    }

    #[test]
    fn saving_a_legendary_beats_finishing_a_common() {
        let mut state = board(vec![spec(10), legendary(11)], vec![spec(1)]);
        state.player.field[0].current_health = 10;
        let legend_max = state.opponent.field[1].derived.max_health;
        state.opponent.field[1].current_health = legend_max / 10;
        state.opponent.spells.push(fireball());
        state.opponent.tools.push(bandage());

        let Some(candidate) = with_ctx(&state, item_play) else {
            panic!("both items are playable");
        };
        assert_eq!(
            candidate.actions,
            vec![BattleAction::UseTool {
                tool: ItemId(60),
                target: CreatureId(11),
            }]
        );
        assert!(candidate.score.value() > 90);
    }

    #[test]
    fn finishing_spell_beats_a_minor_wound() {
        let mut state = board(vec![spec(10), spec(11)], vec![spec(1)]);
        state.player.field[0].current_health = 10;
        let max = state.opponent.field[1].derived.max_health;
        state.opponent.field[1].current_health = max * 2 / 5;
        state.opponent.spells.push(fireball());
        state.opponent.tools.push(bandage());

        let Some(candidate) = with_ctx(&state, item_play) else {
            panic!("both items are playable");
        };
        assert!(matches!(
            candidate.actions[..],
            [BattleAction::UseSpell { spell: ItemId(50), .. }]
        ));
        // 100 × 90 × 75 for a Common target
        assert_eq!(candidate.score.value(), 67);
    }

    #[test]
    fn unaffordable_options_are_proposed_as_impossible() {
        let mut state = board(vec![spec(10)], vec![spec(1)]);
        state.player.field[0].current_health = 10;
        state.opponent.field[0].current_health = 10;
        state.opponent.spells.push(fireball());
        state.opponent.energy = 0;

        let spell = with_ctx(&state, item_play);
        assert!(spell.is_some_and(|c| !c.score.is_possible && c.score.value() == 0));
        let defense = with_ctx(&state, emergency_defense);
        assert!(defense.is_some_and(|c| !c.score.is_possible));

        // a free tool wins over the spell the side cannot pay for
        state.opponent.tools.push(bandage());
        let Some(candidate) = with_ctx(&state, item_play) else {
            panic!("the tool is free");
        };
        assert!(candidate.score.is_possible);
        assert!(matches!(candidate.actions[..], [BattleAction::UseTool { .. }]));
    }

    #[test]
    fn defending_the_last_attacker_rules_out_lethal() {
        let mut state = board(vec![spec(10)], vec![spec(1)]);
        state.player.field[0].current_health = 5;
        state.opponent.field[0].current_health = 10;
        assert!(with_ctx(&state, lethal_search).is_some());

        let mut board = PlanBoard::new(&state, Side::Opponent);
        let Some(defense) = with_ctx(&state, emergency_defense) else {
            panic!("creature 10 is endangered");
        };
        assert!(board.apply(&defense.actions[0]));

        // a defending creature holds its stance for the rest of the turn
        let ctx = PlanContext::new(&board, 100, 1);
        assert!(ctx.attackers().next().is_none());
        assert!(!ctx.can_attack());
        assert!(lethal_search(&ctx).is_none());
    }

    #[test]
    fn weak_board_without_aggression_holds_fire() {
        // one creature against two: power ratio 50%, roll 100 over every floor
        let state = board(vec![spec(10)], vec![spec(1), spec(2)]);
        assert!(with_ctx(&state, aggressive_attacks).is_none());
    }

    #[test]
    fn attack_sequence_spends_the_budget() {
        let state = board(vec![spec(10), spec(11)], vec![spec(1), spec(2)]);
        let Some(candidate) = with_ctx(&state, aggressive_attacks) else {
            panic!("even power should attack");
        };
        // 12 energy at 2 per attack; the field already meets the minimum presence
        assert_eq!(candidate.actions.len(), 6);
        assert!(!candidate.terminal);
    }

    #[test]
    fn deployment_fills_a_thin_field() {
        let state = board(vec![spec(10)], vec![spec(1), spec(2)]);
        let candidate = with_ctx(&state, strategic_deployment);
        assert_eq!(
            candidate.map(|c| c.actions),
            Some(vec![BattleAction::Deploy {
                creature: CreatureId(91)
            }])
        );
    }

    #[test]
    fn cleanup_prefers_untargeted_enemies() {
        let state = board(vec![spec(10)], vec![spec(1), spec(2)]);
        let mut board = PlanBoard::new(&state, Side::Opponent);
        assert!(board.apply(&BattleAction::Attack {
            attacker: CreatureId(10),
            defender: CreatureId(1),
        }));

        let ctx = PlanContext::new(&board, 100, 1);
        let candidate = cleanup(&ctx);
        assert_eq!(
            candidate.map(|c| c.actions),
            Some(vec![BattleAction::Attack {
                attacker: CreatureId(10),
                defender: CreatureId(2),
            }])
        );
    }

    #[test]
    fn end_turn_is_always_available() {
        let state = board(Vec::new(), vec![spec(1)]);
        let candidate = with_ctx(&state, end_turn);
        assert!(candidate.is_some_and(|c| c.ends_turn()));
    }
}
