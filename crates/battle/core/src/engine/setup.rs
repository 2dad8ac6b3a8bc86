use std::collections::HashSet;

use crate::config::{BattleConfig, DifficultyProfile};
use crate::economy;
use crate::error::SetupError;
use crate::state::{BattleState, Creature, CreatureSpec, Item, Phase, Side, SideState};

/// Host-supplied contents of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SideSetup {
    /// Creatures deployed before the first turn.
    pub field: Vec<CreatureSpec>,
    pub hand: Vec<CreatureSpec>,
    pub deck: Vec<CreatureSpec>,
    pub tools: Vec<Item>,
    pub spells: Vec<Item>,
}

/// Opponent side plus the difficulty profile governing the whole battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: DifficultyProfile,
    pub setup: SideSetup,
}

/// Build the initial battle state.
///
/// Instantiates every creature at full health, validates ids and caps,
/// grants starting energy and moves the battle from `Setup` to `Active` with
/// the player to act on turn 1.
///
/// # Errors
///
/// [`SetupError`] for duplicate creature or item ids (across both sides),
/// hands or fields above their caps, repeated specialties or forms above
/// [`BattleConfig::MAX_FORM`].
pub fn start_battle(
    player: SideSetup,
    opponent: OpponentConfig,
    seed: u64,
) -> Result<BattleState, SetupError> {
    let OpponentConfig { profile, setup } = opponent;
    let mut state = BattleState::new(profile, seed);

    let mut creature_ids = HashSet::new();
    let mut item_ids = HashSet::new();
    for (side, setup) in [(Side::Player, &player), (Side::Opponent, &setup)] {
        validate_side(side, setup, &state.profile, &mut creature_ids, &mut item_ids)?;
    }

    state.player = build_side(player, &state.profile);
    state.opponent = build_side(setup, &state.profile);

    state.phase = Phase::Active;
    state.push_log(format!(
        "Battle started on {} difficulty. Your turn.",
        state.profile.tier
    ));
    Ok(state)
}

fn validate_side(
    side: Side,
    setup: &SideSetup,
    profile: &DifficultyProfile,
    creature_ids: &mut HashSet<u32>,
    item_ids: &mut HashSet<u32>,
) -> Result<(), SetupError> {
    let cap = profile.field_capacity(side);
    if setup.field.len() > cap {
        return Err(SetupError::FieldTooLarge {
            side,
            size: setup.field.len(),
            cap,
        });
    }
    if setup.hand.len() > profile.max_hand_size {
        return Err(SetupError::HandTooLarge {
            size: setup.hand.len(),
            cap: profile.max_hand_size,
        });
    }

    for spec in setup.field.iter().chain(&setup.hand).chain(&setup.deck) {
        if !creature_ids.insert(spec.id.0) {
            return Err(SetupError::DuplicateCreature(spec.id));
        }
        if spec.profile.form > BattleConfig::MAX_FORM {
            return Err(SetupError::InvalidForm {
                id: spec.id,
                form: spec.profile.form,
            });
        }
        let specialties = &spec.profile.specialties;
        if specialties.len() == 2 && specialties[0] == specialties[1] {
            return Err(SetupError::DuplicateSpecialty(spec.id));
        }
    }

    for item in setup.tools.iter().chain(&setup.spells) {
        if !item_ids.insert(item.id.0) {
            return Err(SetupError::DuplicateItem(item.id));
        }
    }
    Ok(())
}

fn build_side(setup: SideSetup, profile: &DifficultyProfile) -> SideState {
    let instantiate = |specs: Vec<CreatureSpec>| -> Vec<Creature> {
        specs.into_iter().map(Creature::new).collect()
    };
    let field = instantiate(setup.field);
    let energy = economy::reclamp(
        profile.starting_energy,
        economy::max_energy(profile, field.len()),
    );
    SideState {
        field,
        hand: instantiate(setup.hand),
        deck: instantiate(setup.deck),
        energy,
        tools: setup.tools,
        spells: setup.spells,
    }
}
