//! Simulator configuration structures and loaders.
use std::env;

use battle_core::Difficulty;

/// Turn limit applied when neither the environment nor the CLI sets one.
pub const DEFAULT_MAX_TURNS: u32 = 50;

/// Settings shared by every simulated battle.
///
/// Values come from the environment first; CLI flags override them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Seed for the battle. Falls back to the scenario's seed, then 0.
    pub seed: Option<u64>,
    /// Replaces the scenario's difficulty profile with the shipped tuning.
    pub difficulty: Option<Difficulty>,
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: None,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Battle seed (default: scenario seed)
    /// - `BATTLE_DIFFICULTY` - `easy`, `medium`, `hard` or `expert` (default: scenario profile)
    /// - `BATTLE_MAX_TURNS` - Turn limit for autoplay (default: 50)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.seed = parse(lookup("BATTLE_SEED"));
        config.difficulty = parse(lookup("BATTLE_DIFFICULTY"));
        if let Some(turns) = parse::<u32>(lookup("BATTLE_MAX_TURNS")) {
            config.max_turns = turns.max(1);
        }

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
