//! Tool and spell resolution.
//!
//! Item effects are computed from a base recipe (by item type), reshaped by
//! the item's effect family, then scaled by the effect power.
//!
//! # Formula
//!
//! ```text
//! power       = tier × caster × rarity              (percent)
//! caster      = max(10, 100 + (attribute − 5) × 10)  (spells only)
//! magic_power = 1 + 0.25 × caster.magic              (spells only)
//! ```

use crate::effects::{ActiveEffect, ChargeProgress, EffectKind, PowerLevel, attach_in_place};
use crate::env::Roller;
use crate::env::rng::context;
use crate::state::{Creature, Item, ItemEffect};
use crate::stats::{Attribute, DerivedStat, StatDelta, div_round, scale_pct};

/// Spell critical chance cap (percent).
pub const SPELL_CRITICAL_CAP: u32 = 25;
/// Spell critical multiplier (percent).
pub const SPELL_CRITICAL_PCT: i64 = 180;
/// Extra damage from armor piercing (percent of damage).
pub const ARMOR_PIERCING_PCT: i64 = 30;
/// Surge spell damage multiplier (percent).
pub const SURGE_PCT: i64 = 350;
/// Power at which every damaging spell pierces armor.
pub const ARMOR_PIERCING_POWER: i64 = 130;

/// Effect power of an item (percent).
///
/// # Arguments
///
/// * `tier_pct` - Difficulty effect power
/// * `item` - Tool or spell being used
/// * `caster` - Spell caster; `None` for tools
pub fn effect_power(tier_pct: u32, item: &Item, caster: Option<&Creature>) -> i64 {
    let caster_pct = caster.map_or(100, |c| {
        let score = c.attributes().map_or(5, |a| a.get(item.item_type)) as i64;
        (100 + (score - 5) * 10).max(10)
    });
    div_round(
        tier_pct as i64 * caster_pct * item.rarity.item_power_pct(),
        10_000,
    )
}

/// Render a delta as `"physical attack +8, dodge chance +5"`.
pub fn describe_delta(delta: &StatDelta) -> String {
    delta
        .iter()
        .map(|(stat, value)| format!("{} {:+}", stat.label(), value))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tools
// ============================================================================

/// Result of using a tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutcome {
    pub creature: Creature,
    /// Effect attached to the ledger, as attached.
    pub effect: ActiveEffect,
    pub healed: i32,
    /// Energy to add to the user's pool.
    pub energy_gain: u32,
    pub message: String,
}

struct ToolRecipe {
    delta: StatDelta,
    heal: i64,
    heal_per_tick: i64,
    energy_gain: i64,
    duration: u32,
    charge: Option<ChargeProgress>,
}

fn tool_base(item_type: Attribute) -> (StatDelta, i64, i64) {
    let delta = StatDelta::new();
    match item_type {
        Attribute::Energy => (delta.with(DerivedStat::EnergyCost, -2), 0, 3),
        Attribute::Strength => (delta.with(DerivedStat::PhysicalAttack, 8), 0, 0),
        Attribute::Magic => (delta.with(DerivedStat::MagicalAttack, 8), 0, 0),
        Attribute::Stamina => (delta.with(DerivedStat::PhysicalDefense, 8), 15, 0),
        Attribute::Speed => (
            delta
                .with(DerivedStat::Initiative, 8)
                .with(DerivedStat::DodgeChance, 5),
            0,
            0,
        ),
    }
}

fn tool_recipe(tool: &Item) -> ToolRecipe {
    let (delta, heal, energy_gain) = tool_base(tool.item_type);
    match tool.effect {
        ItemEffect::Surge => ToolRecipe {
            delta: delta.scaled(300),
            heal: heal * 2,
            heal_per_tick: 0,
            energy_gain,
            duration: 2,
            charge: None,
        },
        ItemEffect::Shield => ToolRecipe {
            delta: StatDelta::new()
                .with(DerivedStat::PhysicalDefense, 15)
                .with(DerivedStat::MagicalDefense, 15)
                .with(DerivedStat::MaxHealth, 20),
            heal: 10,
            heal_per_tick: 0,
            energy_gain: 0,
            duration: 4,
            charge: None,
        },
        ItemEffect::Echo => ToolRecipe {
            delta: delta.scaled(80),
            heal: 0,
            heal_per_tick: scale_pct(heal, 30),
            energy_gain,
            duration: 6,
            charge: None,
        },
        ItemEffect::Drain => ToolRecipe {
            delta: StatDelta::new()
                .with(DerivedStat::PhysicalAttack, 12)
                .with(DerivedStat::MagicalAttack, 12)
                .with(DerivedStat::PhysicalDefense, -4)
                .with(DerivedStat::MagicalDefense, -4),
            heal: 8,
            heal_per_tick: 0,
            energy_gain: 0,
            duration: 4,
            charge: None,
        },
        ItemEffect::Charge => ToolRecipe {
            delta: StatDelta::new(),
            heal: 0,
            heal_per_tick: 0,
            energy_gain: 0,
            duration: 4,
            charge: Some(ChargeProgress::new(5, 4, 20)),
        },
    }
}

fn scale_charge(charge: ChargeProgress, power: i64) -> ChargeProgress {
    ChargeProgress::new(
        scale_pct(charge.per_tick as i64, power) as i32,
        charge.ticks_required,
        scale_pct(charge.final_burst as i64, power) as i32,
    )
}

/// Use a tool on one of the user's own creatures.
///
/// # Arguments
///
/// * `creature` - Target creature (on the user's field)
/// * `tool` - Tool being consumed
/// * `power` - Effect power from [`effect_power`]
pub fn apply_tool(creature: &Creature, tool: &Item, power: i64) -> ToolOutcome {
    let recipe = tool_recipe(tool);
    let power_level = PowerLevel::from_power_pct(power);
    let heal_per_tick = scale_pct(recipe.heal_per_tick, power) as i32;

    let mut effect = ActiveEffect::new(
        format!("{} Effect", tool.name),
        if heal_per_tick > 0 {
            EffectKind::Hot
        } else {
            EffectKind::Buff
        },
        recipe.duration,
    )
    .with_delta(recipe.delta.scaled(power))
    .with_health_per_tick(heal_per_tick)
    .with_power(power_level);
    if let Some(charge) = recipe.charge {
        effect = effect.with_charge(scale_charge(charge, power));
    }

    let mut creature = creature.clone();
    attach_in_place(&mut creature, effect);
    let healed = creature.heal(scale_pct(recipe.heal, power) as i32);
    let energy_gain = scale_pct(recipe.energy_gain, power).max(0) as u32;

    let mut message = format!("{} empowered {}", tool.name, creature.species_name);
    let attached = creature
        .effects
        .last()
        .cloned()
        .unwrap_or_else(|| ActiveEffect::new(tool.name.clone(), EffectKind::Buff, 1));
    let described = describe_delta(&attached.stat_delta);
    if !described.is_empty() {
        message.push_str(&format!(" ({described})"));
    }
    if let Some(charge) = attached.charge {
        message.push_str(&format!(
            ", charging {} per turn for {} turns",
            charge.per_tick, charge.ticks_required
        ));
    }
    if healed > 0 {
        message.push_str(&format!(", restoring {healed} health"));
    }
    if energy_gain > 0 {
        message.push_str(&format!(", granting {energy_gain} energy"));
    }
    message.push('.');

    ToolOutcome {
        creature,
        effect: attached,
        healed,
        energy_gain,
        message,
    }
}

// ============================================================================
// Spells
// ============================================================================

/// Result of casting a spell.
///
/// When the spell targets its caster, `caster` and `target` are the same
/// final creature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellOutcome {
    pub caster: Creature,
    pub target: Creature,
    pub damage: u32,
    pub was_critical: bool,
    /// Health restored on the target.
    pub healed: i32,
    /// Health restored on the caster by a drain.
    pub self_healed: i32,
    pub energy_gain: u32,
    pub message: String,
}

struct SpellBase {
    /// Damage coefficient multiplied by magic power.
    damage: Option<i64>,
    /// Heal coefficient multiplied by magic power.
    heal: Option<i64>,
    delta: StatDelta,
    energy_gain: i64,
}

fn spell_base(item_type: Attribute) -> SpellBase {
    let delta = StatDelta::new();
    match item_type {
        Attribute::Strength => SpellBase {
            damage: Some(30),
            heal: None,
            delta: delta.with(DerivedStat::PhysicalAttack, 10),
            energy_gain: 0,
        },
        Attribute::Magic => SpellBase {
            damage: Some(28),
            heal: None,
            delta: delta
                .with(DerivedStat::MagicalAttack, 10)
                .with(DerivedStat::MagicalDefense, 5),
            energy_gain: 0,
        },
        Attribute::Stamina => SpellBase {
            damage: None,
            heal: Some(35),
            delta: delta.with(DerivedStat::PhysicalDefense, 8),
            energy_gain: 0,
        },
        Attribute::Speed => SpellBase {
            damage: None,
            heal: None,
            delta: delta
                .with(DerivedStat::Initiative, 12)
                .with(DerivedStat::DodgeChance, 8)
                .with(DerivedStat::CriticalChance, 8),
            energy_gain: 0,
        },
        Attribute::Energy => SpellBase {
            damage: None,
            heal: None,
            delta: delta.with(DerivedStat::EnergyCost, -3),
            energy_gain: 8,
        },
    }
}

/// Caster-side numbers shared by every spell computation.
struct Casting {
    /// Magic power in percent (`100 + 25 × magic`).
    magic_pct: i64,
    power: i64,
}

impl Casting {
    /// `coefficient × magic power × effect power`, rounded.
    fn amount(&self, coefficient: i64) -> i64 {
        self.amount_pct(coefficient, 100)
    }

    /// [`Casting::amount`] with an extra multiplier (percent).
    fn amount_pct(&self, coefficient: i64, extra_pct: i64) -> i64 {
        div_round(
            coefficient * self.magic_pct * self.power * extra_pct,
            1_000_000,
        )
    }
}

fn target_of<'a>(caster: &'a mut Creature, target: &'a mut Option<Creature>) -> &'a mut Creature {
    match target {
        Some(target) => target,
        None => caster,
    }
}

/// Cast a spell.
///
/// # Arguments
///
/// * `caster` - Casting creature (on the caster's field)
/// * `target` - Target on either field; pass the caster for self-casts
/// * `spell` - Spell being consumed
/// * `power` - Effect power from [`effect_power`]
/// * `roller` - Dice for the spell critical roll
pub fn apply_spell(
    caster: &Creature,
    target: &Creature,
    spell: &Item,
    power: i64,
    roller: &Roller<'_>,
) -> SpellOutcome {
    let magic = caster.attributes().map_or(5, |a| a.magic);
    let casting = Casting {
        magic_pct: 100 + 25 * magic as i64,
        power,
    };
    let base = spell_base(spell.item_type);
    let power_level = PowerLevel::from_power_pct(power);

    let self_cast = caster.id == target.id;
    let mut caster_out = caster.clone();
    let mut target_out = (!self_cast).then(|| target.clone());

    let mut damage = 0i64;
    let mut armor_piercing = power >= ARMOR_PIERCING_POWER;
    let mut heal = 0i64;
    let mut self_heal = 0i64;
    let mut energy_gain = 0i64;

    match spell.effect {
        ItemEffect::Surge => {
            damage = casting.amount_pct(base.damage.unwrap_or(20), SURGE_PCT);
            armor_piercing = true;
        }
        ItemEffect::Shield => {
            let effect = ActiveEffect::new(format!("{} Effect", spell.name), EffectKind::Buff, 4)
                .with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalDefense, 18)
                        .with(DerivedStat::MagicalDefense, 18)
                        .with(DerivedStat::MaxHealth, 25)
                        .scaled(power),
                )
                .with_power(power_level);
            attach_in_place(target_of(&mut caster_out, &mut target_out), effect);
            heal = casting.amount(20);
        }
        ItemEffect::Echo => {
            let per_tick = match (base.heal, base.damage) {
                (Some(h), _) => div_round(casting.amount(h), 2),
                (None, Some(d)) => -div_round(casting.amount(d), 2),
                (None, None) => 0,
            } as i32;
            let kind = match per_tick {
                t if t > 0 => EffectKind::Hot,
                t if t < 0 => EffectKind::Dot,
                _ => EffectKind::Buff,
            };
            let effect = ActiveEffect::new(format!("{} Effect", spell.name), kind, 4)
                .with_delta(base.delta.scaled(40).scaled(power))
                .with_health_per_tick(per_tick)
                .with_power(power_level);
            attach_in_place(target_of(&mut caster_out, &mut target_out), effect);
            energy_gain = scale_pct(base.energy_gain, power);
        }
        ItemEffect::Drain => {
            damage = casting.amount(25);
            self_heal = casting.amount(15);
            let drained = ActiveEffect::new("Drained", EffectKind::Debuff, 2)
                .with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalAttack, -5)
                        .with(DerivedStat::MagicalAttack, -5),
                )
                .with_power(power_level);
            let siphoned = ActiveEffect::new("Siphoned Power", EffectKind::Buff, 2)
                .with_delta(
                    StatDelta::new()
                        .with(DerivedStat::PhysicalAttack, 3)
                        .with(DerivedStat::MagicalAttack, 3),
                )
                .with_power(power_level);
            attach_in_place(target_of(&mut caster_out, &mut target_out), drained);
            attach_in_place(&mut caster_out, siphoned);
        }
        ItemEffect::Charge => {
            let charge = ChargeProgress::new(
                casting.amount(5) as i32,
                2,
                casting.amount(20) as i32,
            );
            let effect = ActiveEffect::new(format!("{} Charge", spell.name), EffectKind::Charge, 3)
                .with_charge(charge)
                .with_power(power_level);
            attach_in_place(&mut caster_out, effect);
        }
    }

    // Spell damage bypasses defense; only criticals and piercing modify it.
    let mut was_critical = false;
    if damage > 0 {
        let crit_chance = (5 + magic / 2).min(SPELL_CRITICAL_CAP);
        if roller.chance(caster.id.0, context::SPELL_CRITICAL, crit_chance) {
            was_critical = true;
            damage = div_round(damage * SPELL_CRITICAL_PCT, 100);
        }
        if armor_piercing {
            damage += div_round(damage * ARMOR_PIERCING_PCT, 100);
        }
    }

    let dealt = if damage > 0 {
        target_of(&mut caster_out, &mut target_out).take_damage(damage as u32)
    } else {
        0
    };
    let healed = target_of(&mut caster_out, &mut target_out).heal(heal as i32);
    let self_healed = caster_out.heal(self_heal as i32);
    let energy_gain = energy_gain.max(0) as u32;

    let target_name = target_of(&mut caster_out, &mut target_out)
        .species_name
        .clone();
    let mut message = format!(
        "{} cast {} on {}",
        caster.species_name, spell.name, target_name
    );
    if was_critical {
        message.push_str(" (Critical!)");
    }
    if damage > 0 {
        message.push_str(&format!(" dealing {dealt} damage"));
    }
    if healed > 0 {
        message.push_str(&format!(", restoring {healed} health"));
    }
    if self_healed > 0 {
        message.push_str(&format!(", draining {self_healed} health"));
    }
    if energy_gain > 0 {
        message.push_str(&format!(", granting {energy_gain} energy"));
    }
    message.push('.');

    let target_final = target_out.unwrap_or_else(|| caster_out.clone());
    SpellOutcome {
        caster: caster_out,
        target: target_final,
        damage: dealt,
        was_critical,
        healed,
        self_healed,
        energy_gain,
        message,
    }
}

/// Expected damage of a spell against a target, without rolls.
///
/// Used by the opponent planner to find finishing spells.
pub fn estimate_spell_damage(caster: &Creature, spell: &Item, power: i64) -> u32 {
    let magic = caster.attributes().map_or(5, |a| a.magic);
    let casting = Casting {
        magic_pct: 100 + 25 * magic as i64,
        power,
    };
    let base = spell_base(spell.item_type);
    let (mut damage, piercing) = match spell.effect {
        ItemEffect::Surge => (casting.amount_pct(base.damage.unwrap_or(20), SURGE_PCT), true),
        ItemEffect::Drain => (casting.amount(25), power >= ARMOR_PIERCING_POWER),
        _ => (0, false),
    };
    if piercing {
        damage += div_round(damage * ARMOR_PIERCING_PCT, 100);
    }
    damage.max(0) as u32
}

/// Whether a spell restores health on its target.
pub fn spell_heals(spell: &Item) -> bool {
    match spell.effect {
        ItemEffect::Shield => true,
        ItemEffect::Echo => spell_base(spell.item_type).heal.is_some(),
        _ => false,
    }
}
