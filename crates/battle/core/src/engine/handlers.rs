//! Per-action handlers.
//!
//! Each handler validates against the working copy first and only then
//! pays energy and resolves. Any `Err` discards the working copy.

use super::{BattleEngine, actor_label, owner_label};
use crate::combat::{self, apply_spell, apply_tool, effect_power, resolve_attack};
use crate::economy;
use crate::error::ActionError;
use crate::state::{CreatureId, ItemId, Side};

impl BattleEngine<'_> {
    // ========================================================================
    // Lookup
    // ========================================================================

    /// Index of `id` on `side`'s own field.
    fn own_field_index(&self, side: Side, id: CreatureId) -> Result<usize, ActionError> {
        let own = self.state.side(side);
        if let Some(index) = own.field_index(id) {
            return Ok(index);
        }
        Err(if own.owns(id) {
            ActionError::NotOnField(id)
        } else if self.state.side(side.opposite()).owns(id) {
            ActionError::InvalidTarget
        } else {
            ActionError::CreatureNotFound(id)
        })
    }

    /// Index of `id` on the field opposing `side`.
    fn enemy_field_index(&self, side: Side, id: CreatureId) -> Result<usize, ActionError> {
        let enemy = self.state.side(side.opposite());
        if let Some(index) = enemy.field_index(id) {
            return Ok(index);
        }
        Err(if self.state.side(side).owns(id) {
            ActionError::InvalidTarget
        } else if enemy.owns(id) {
            ActionError::NotOnField(id)
        } else {
            ActionError::CreatureNotFound(id)
        })
    }

    /// Owner and index of `id` on either field.
    fn any_field_index(&self, id: CreatureId) -> Result<(Side, usize), ActionError> {
        if let Some(owner) = self.state.field_owner(id) {
            if let Some(index) = self.state.side(owner).field_index(id) {
                return Ok((owner, index));
            }
        }
        Err(
            if self.state.player.owns(id) || self.state.opponent.owns(id) {
                ActionError::NotOnField(id)
            } else {
                ActionError::CreatureNotFound(id)
            },
        )
    }

    fn pay(&mut self, side: Side, amount: u32) -> Result<(), ActionError> {
        let pool = &mut self.state.side_mut(side).energy;
        *pool = economy::spend(*pool, amount)?;
        Ok(())
    }

    // ========================================================================
    // Actions
    // ========================================================================

    pub(super) fn deploy(&mut self, side: Side, id: CreatureId) -> Result<(), ActionError> {
        let own = self.state.side(side);
        let Some(index) = own.hand_index(id) else {
            return Err(
                if own.owns(id) || self.state.side(side.opposite()).owns(id) {
                    ActionError::NotInHand(id)
                } else {
                    ActionError::CreatureNotFound(id)
                },
            );
        };

        let capacity = self.state.profile.field_capacity(side);
        if own.field.len() >= capacity {
            return Err(ActionError::FieldFull { capacity });
        }
        let cost = own.hand[index].derived.energy_cost.max(1) as u32;
        self.pay(side, cost)?;

        let own = self.state.side_mut(side);
        let creature = own.hand.remove(index);
        let name = creature.species_name.clone();
        own.field.push(creature);
        self.state.push_log(format!(
            "{} deployed {name} to the battlefield! (-{cost} energy)",
            actor_label(side)
        ));
        Ok(())
    }

    pub(super) fn attack(
        &mut self,
        side: Side,
        attacker: CreatureId,
        defender: CreatureId,
    ) -> Result<(), ActionError> {
        let attacker_index = self.own_field_index(side, attacker)?;
        let defender_index = self.enemy_field_index(side, defender)?;
        let cost = self.state.profile.attack_cost;
        self.pay(side, cost)?;

        let roller = self.roller();
        let resolution = resolve_attack(
            &self.state.side(side).field[attacker_index],
            &self.state.side(side.opposite()).field[defender_index],
            None,
            &roller,
        );
        self.state.side_mut(side).field[attacker_index] = resolution.attacker;
        self.state.side_mut(side.opposite()).field[defender_index] = resolution.defender;
        self.state
            .push_log(format!("{} (-{cost} energy)", resolution.message));

        self.after_action();
        Ok(())
    }

    pub(super) fn use_tool(
        &mut self,
        side: Side,
        tool: ItemId,
        target: CreatureId,
    ) -> Result<(), ActionError> {
        let tool_index = self
            .state
            .side(side)
            .tool_index(tool)
            .ok_or(ActionError::ItemNotFound(tool))?;
        let target_index = self.own_field_index(side, target)?;

        let tool = self.state.side_mut(side).tools.remove(tool_index);
        let power = effect_power(self.state.profile.effect_power_pct, &tool, None);
        let outcome = apply_tool(&self.state.side(side).field[target_index], &tool, power);

        let max = self.state.max_energy(side);
        let own = self.state.side_mut(side);
        own.field[target_index] = outcome.creature;
        own.energy = economy::gain(own.energy, outcome.energy_gain, max);
        self.state.push_log(outcome.message);

        self.after_action();
        Ok(())
    }

    pub(super) fn use_spell(
        &mut self,
        side: Side,
        spell: ItemId,
        caster: CreatureId,
        target: Option<CreatureId>,
    ) -> Result<(), ActionError> {
        let spell_index = self
            .state
            .side(side)
            .spell_index(spell)
            .ok_or(ActionError::ItemNotFound(spell))?;
        let caster_index = self.own_field_index(side, caster)?;
        let (target_side, target_index) = match target {
            Some(id) => self.any_field_index(id)?,
            None => (side, caster_index),
        };
        let cost = self.state.profile.spell_cost;
        self.pay(side, cost)?;

        let spell = self.state.side_mut(side).spells.remove(spell_index);
        let caster = self.state.side(side).field[caster_index].clone();
        let power = effect_power(self.state.profile.effect_power_pct, &spell, Some(&caster));
        let roller = self.roller();
        let outcome = apply_spell(
            &caster,
            &self.state.side(target_side).field[target_index],
            &spell,
            power,
            &roller,
        );

        let self_cast = target_side == side && target_index == caster_index;
        if !self_cast {
            self.state.side_mut(side).field[caster_index] = outcome.caster;
        }
        self.state.side_mut(target_side).field[target_index] = outcome.target;

        let max = self.state.max_energy(side);
        let own = self.state.side_mut(side);
        own.energy = economy::gain(own.energy, outcome.energy_gain, max);
        self.state
            .push_log(format!("{} (-{cost} energy)", outcome.message));

        self.after_action();
        Ok(())
    }

    pub(super) fn defend(&mut self, side: Side, id: CreatureId) -> Result<(), ActionError> {
        let index = self.own_field_index(side, id)?;
        if self.state.side(side).field[index].is_defending {
            return Err(ActionError::AlreadyDefending(id));
        }
        let cost = self.state.profile.defend_cost;
        self.pay(side, cost)?;

        let boost = self.state.profile.defend_boost_pct;
        let own = self.state.side_mut(side);
        let defended = combat::defend(&own.field[index], boost);
        let name = defended.species_name.clone();
        own.field[index] = defended;
        self.state.push_log(format!(
            "{} {name} took a defensive stance! (-{cost} energy)",
            owner_label(side)
        ));
        Ok(())
    }
}
