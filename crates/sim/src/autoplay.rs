//! Headless battle loop: the planner plays both sides.

use battle_core::{BattleState, Creature, LogEntry, Phase, RngOracle, Side};
use battle_runtime::{OpponentPlanner, run_side_turn};
use serde::Serialize;

/// How an autoplayed battle went.
#[derive(Clone, Debug)]
pub struct AutoplayReport {
    pub state: BattleState,
    /// Side turns executed.
    pub side_turns: u32,
    pub player_actions: usize,
    pub opponent_actions: usize,
    /// Planned actions the engine rejected.
    pub skipped: usize,
    /// The turn limit stopped the battle before a side was exhausted.
    pub stopped_early: bool,
}

/// Play `state` out with the planner on both sides.
///
/// Stops at a terminal phase or once the battle reaches `max_turns`.
pub fn run(state: BattleState, max_turns: u32, rng: &dyn RngOracle) -> AutoplayReport {
    let planner = OpponentPlanner::new();
    let mut report = AutoplayReport {
        state,
        side_turns: 0,
        player_actions: 0,
        opponent_actions: 0,
        skipped: 0,
        stopped_early: false,
    };

    while !report.state.is_over() {
        if report.state.turn > max_turns {
            report.stopped_early = true;
            tracing::info!("turn limit {max_turns} reached");
            break;
        }

        let side = report.state.active_side;
        let turn = run_side_turn(&report.state, side, &planner, rng);
        if turn.actions_taken.is_empty() {
            tracing::warn!("{side} could not act, stopping");
            report.stopped_early = true;
            break;
        }

        match side {
            Side::Player => report.player_actions += turn.actions_taken.len(),
            Side::Opponent => report.opponent_actions += turn.actions_taken.len(),
        }
        report.skipped += turn.skipped;
        report.side_turns += 1;
        report.state = turn.state;
    }

    report
}

/// JSON summary printed with `--json`.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub scenario: String,
    pub seed: u64,
    pub difficulty: String,
    pub phase: Phase,
    pub turns: u32,
    pub side_turns: u32,
    pub player_actions: usize,
    pub opponent_actions: usize,
    pub skipped: usize,
    pub stopped_early: bool,
    pub player_field: Vec<CreatureSummary>,
    pub opponent_field: Vec<CreatureSummary>,
    /// Hex-encoded state digest for replay comparison.
    pub digest: String,
    pub log: Vec<LogEntry>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreatureSummary {
    pub id: u32,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
}

impl From<&Creature> for CreatureSummary {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id.0,
            name: creature.species_name.clone(),
            health: creature.current_health,
            max_health: creature.derived.max_health,
        }
    }
}

impl Summary {
    pub fn new(scenario: &str, report: &AutoplayReport) -> Self {
        let state = &report.state;
        let field = |side: Side| state.field(side).iter().map(CreatureSummary::from).collect();
        Self {
            scenario: scenario.to_owned(),
            seed: state.seed,
            difficulty: state.profile.tier.to_string(),
            phase: state.phase,
            turns: state.turn,
            side_turns: report.side_turns,
            player_actions: report.player_actions,
            opponent_actions: report.opponent_actions,
            skipped: report.skipped,
            stopped_early: report.stopped_early,
            player_field: field(Side::Player),
            opponent_field: field(Side::Opponent),
            digest: hex_digest(state),
            log: state.log.clone(),
        }
    }
}

pub fn hex_digest(state: &BattleState) -> String {
    hex::encode(state.digest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;
    use battle_core::{Difficulty, PcgRng, start_battle};
    use strum::IntoEnumIterator;

    fn sample_state(tier: Difficulty, seed: u64) -> BattleState {
        let scenario = match Scenario::parse(include_str!("../scenarios/sample.json")) {
            Ok(scenario) => scenario.with_difficulty(tier),
            Err(err) => panic!("sample rejected: {err:#}"),
        };
        match start_battle(scenario.player, scenario.opponent, seed) {
            Ok(state) => state,
            Err(err) => panic!("sample setup failed: {err}"),
        }
    }

    #[test]
    fn autoplay_ends_or_hits_the_turn_limit() {
        for tier in Difficulty::iter() {
            let report = run(sample_state(tier, 7), 40, &PcgRng);
            assert!(report.state.is_over() || report.stopped_early);
            assert!(report.state.turn <= 41);
            assert!(report.player_actions > 0);
        }
    }

    #[test]
    fn autoplay_is_deterministic() {
        let a = run(sample_state(Difficulty::Hard, 11), 30, &PcgRng);
        let b = run(sample_state(Difficulty::Hard, 11), 30, &PcgRng);
        assert_eq!(a.state, b.state);
        assert_eq!(hex_digest(&a.state), hex_digest(&b.state));
    }

    #[test]
    fn turn_limit_stops_the_battle() {
        let report = run(sample_state(Difficulty::Medium, 3), 1, &PcgRng);
        if !report.state.is_over() {
            assert!(report.stopped_early);
            assert_eq!(report.side_turns, 2);
        }
    }

    #[test]
    fn summary_reflects_the_final_state() {
        let report = run(sample_state(Difficulty::Easy, 5), 10, &PcgRng);
        let summary = Summary::new("sample", &report);

        assert_eq!(summary.seed, 5);
        assert_eq!(summary.difficulty, "easy");
        assert_eq!(summary.digest.len(), 64);
        assert_eq!(summary.digest, hex::encode(report.state.digest()));
        assert!(
            summary
                .digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
        assert_eq!(summary.log.len(), report.state.log.len());
        assert!(serde_json::to_string(&summary).is_ok());
    }
}
