//! Per-side energy pool.
//!
//! # Formula
//!
//! ```text
//! max_energy = base_max_energy + ⌊field / 2⌋
//! regen      = round(base_regen + Σ energy × 0.3 × rarity_regen × (1 + 0.1·form)
//!                    + energy_specialists) + opponent_bonus
//! ```
//!
//! Action costs live in [`DifficultyProfile`]; deployment reads the creature's
//! derived `energy_cost` and tools are free.

use crate::config::DifficultyProfile;
use crate::state::SideState;
use crate::stats::{Attribute, div_round};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    #[error("insufficient energy: requires {required}, have {available}")]
    Insufficient { required: u32, available: u32 },
}

/// Energy cap for a side with `field_len` deployed creatures.
pub fn max_energy(profile: &DifficultyProfile, field_len: usize) -> u32 {
    profile.base_max_energy + (field_len / 2) as u32
}

/// Energy regenerated when a side begins its turn.
///
/// # Arguments
///
/// * `side` - Side whose field contributes to regeneration
/// * `profile` - Tier tuning (base regen, opponent bonus)
/// * `is_opponent` - Whether the opponent-only bonus applies
pub fn regen(side: &SideState, profile: &DifficultyProfile, is_opponent: bool) -> u32 {
    // Units of 1/1_000_000: weight 0.30, rarity percent, form percent.
    const SCALE: i64 = 1_000_000;

    let mut total = profile.base_regen as i64 * SCALE;
    for creature in &side.field {
        let energy = creature.attribute(Attribute::Energy) as i64;
        let form_pct = 100 + 10 * creature.form() as i64;
        total += energy * 30 * creature.rarity().regen_pct() * form_pct;
        if creature.is_specialist(Attribute::Energy) {
            total += SCALE;
        }
    }

    let bonus = if is_opponent {
        profile.opponent_regen_bonus
    } else {
        0
    };
    div_round(total, SCALE).max(0) as u32 + bonus
}

/// Add energy without exceeding `max`.
pub fn gain(energy: u32, amount: u32, max: u32) -> u32 {
    energy.saturating_add(amount).min(max.max(energy))
}

/// Pay `amount` energy.
///
/// # Errors
///
/// [`EconomyError::Insufficient`] when the pool is too small; the pool is
/// left untouched.
pub fn spend(energy: u32, amount: u32) -> Result<u32, EconomyError> {
    energy
        .checked_sub(amount)
        .ok_or(EconomyError::Insufficient {
            required: amount,
            available: energy,
        })
}

/// Pull energy back under the cap after the field shrank.
pub fn reclamp(energy: u32, max: u32) -> u32 {
    energy.min(max)
}
