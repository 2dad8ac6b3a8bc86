//! Consumable tools and spells.

use crate::stats::{Attribute, Rarity};

/// Unique identifier of an item within one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Effect family of a tool or spell.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemEffect {
    Surge,
    Shield,
    Echo,
    Drain,
    Charge,
}

/// A consumable tool or spell. Consumed on use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub item_type: Attribute,
    pub effect: ItemEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl Item {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        item_type: Attribute,
        effect: ItemEffect,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            item_type,
            effect,
            rarity,
        }
    }
}
