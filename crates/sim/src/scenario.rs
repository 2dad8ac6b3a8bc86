//! JSON battle scenarios.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use battle_core::{Difficulty, DifficultyProfile, OpponentConfig, SideSetup};
use serde::Deserialize;

/// Both sides of a battle as written in a scenario file.
///
/// `opponent.profile` may be omitted (medium tuning) or given in full.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub player: SideSetup,
    pub opponent: OpponentConfig,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Replace the profile with the shipped tuning for `tier`.
    pub fn with_difficulty(mut self, tier: Difficulty) -> Self {
        self.opponent.profile = DifficultyProfile::for_tier(tier);
        self
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../scenarios/sample.json");

    #[test]
    fn sample_scenario_parses() {
        let scenario = match Scenario::parse(SAMPLE) {
            Ok(scenario) => scenario,
            Err(err) => panic!("sample rejected: {err:#}"),
        };
        assert_eq!(scenario.label(), "Forest skirmish");
        assert_eq!(scenario.player.field.len(), 2);
        assert!(!scenario.opponent.setup.hand.is_empty());
        assert_eq!(scenario.opponent.profile.tier, Difficulty::Hard);
    }

    #[test]
    fn missing_profile_defaults_to_medium() {
        let raw = r#"{
            "player": { "field": [] },
            "opponent": { "setup": {} }
        }"#;
        let scenario = match Scenario::parse(raw) {
            Ok(scenario) => scenario,
            Err(err) => panic!("minimal scenario rejected: {err:#}"),
        };
        assert_eq!(scenario.opponent.profile, DifficultyProfile::default());
        assert_eq!(scenario.label(), "unnamed");
    }

    #[test]
    fn difficulty_override_replaces_profile() {
        let scenario = match Scenario::parse(SAMPLE) {
            Ok(scenario) => scenario.with_difficulty(Difficulty::Easy),
            Err(err) => panic!("sample rejected: {err:#}"),
        };
        assert_eq!(
            scenario.opponent.profile,
            DifficultyProfile::for_tier(Difficulty::Easy)
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Scenario::parse("{ \"player\": 3 }").is_err());
    }
}
