//! Per-side board state: field, hand, deck, energy and consumables.

use super::creature::{Creature, CreatureId};
use super::item::{Item, ItemId};

/// Board state of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Deployed creatures, bounded by the side's field capacity.
    pub field: Vec<Creature>,
    /// Creatures ready to deploy, bounded by the hand cap.
    pub hand: Vec<Creature>,
    /// Draw pile; cards are drawn from the front.
    pub deck: Vec<Creature>,
    pub energy: u32,
    pub tools: Vec<Item>,
    pub spells: Vec<Item>,
}

impl SideState {
    pub fn field_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.field.iter().find(|c| c.id == id)
    }

    pub fn field_creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.field.iter_mut().find(|c| c.id == id)
    }

    pub fn field_index(&self, id: CreatureId) -> Option<usize> {
        self.field.iter().position(|c| c.id == id)
    }

    pub fn hand_index(&self, id: CreatureId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    pub fn tool_index(&self, id: ItemId) -> Option<usize> {
        self.tools.iter().position(|item| item.id == id)
    }

    pub fn spell_index(&self, id: ItemId) -> Option<usize> {
        self.spells.iter().position(|item| item.id == id)
    }

    /// True when the creature exists anywhere on this side.
    pub fn owns(&self, id: CreatureId) -> bool {
        self.field
            .iter()
            .chain(self.hand.iter())
            .chain(self.deck.iter())
            .any(|c| c.id == id)
    }

    /// A side with no creatures left anywhere has lost.
    pub fn is_exhausted(&self) -> bool {
        self.field.is_empty() && self.hand.is_empty() && self.deck.is_empty()
    }

    /// Sum of the four attack/defense values on the field.
    pub fn field_power(&self) -> i64 {
        self.field
            .iter()
            .map(|c| c.derived.combat_total() as i64)
            .sum()
    }
}
