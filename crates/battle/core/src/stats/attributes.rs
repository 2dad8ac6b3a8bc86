//! Base attributes and rarity tables.
//!
//! The five attributes form a cycle used by the effectiveness rules:
//!
//! ```text
//! strength → stamina → speed → magic → energy → strength
//! ```
//!
//! Each attribute beats the next one and is beaten by the previous one.

/// One of the five base attributes of a creature.
///
/// Also used as the item type of tools and spells.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    Energy,
    Strength,
    Magic,
    Stamina,
    Speed,
}

impl Attribute {
    /// The attribute this one has the advantage over.
    pub const fn beats(self) -> Self {
        match self {
            Self::Strength => Self::Stamina,
            Self::Stamina => Self::Speed,
            Self::Speed => Self::Magic,
            Self::Magic => Self::Energy,
            Self::Energy => Self::Strength,
        }
    }

    /// The attribute that has the advantage over this one.
    pub const fn beaten_by(self) -> Self {
        match self {
            Self::Strength => Self::Energy,
            Self::Stamina => Self::Strength,
            Self::Speed => Self::Stamina,
            Self::Magic => Self::Speed,
            Self::Energy => Self::Magic,
        }
    }
}

/// Raw attribute scores of a creature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseAttributes {
    pub energy: u32,
    pub strength: u32,
    pub magic: u32,
    pub stamina: u32,
    pub speed: u32,
}

impl BaseAttributes {
    pub const fn new(energy: u32, strength: u32, magic: u32, stamina: u32, speed: u32) -> Self {
        Self {
            energy,
            strength,
            magic,
            stamina,
            speed,
        }
    }

    /// Same score in every attribute.
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value)
    }

    pub const fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Energy => self.energy,
            Attribute::Strength => self.strength,
            Attribute::Magic => self.magic,
            Attribute::Stamina => self.stamina,
            Attribute::Speed => self.speed,
        }
    }
}

/// Rarity tier of a creature or item.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Ordinal rank, Common = 1 through Legendary = 4.
    pub const fn rank(self) -> u32 {
        match self {
            Self::Common => 1,
            Self::Rare => 2,
            Self::Epic => 3,
            Self::Legendary => 4,
        }
    }

    /// Stat scaling applied during derivation (percent).
    pub const fn stat_pct(self) -> i64 {
        match self {
            Self::Common => 100,
            Self::Rare => 120,
            Self::Epic => 140,
            Self::Legendary => 160,
        }
    }

    /// Scaling of per-tick health deltas (percent).
    pub const fn tick_pct(self) -> i64 {
        match self {
            Self::Common => 100,
            Self::Rare => 110,
            Self::Epic => 120,
            Self::Legendary => 130,
        }
    }

    /// Scaling of a creature's energy contribution to regeneration (percent).
    pub const fn regen_pct(self) -> i64 {
        match self {
            Self::Common => 100,
            Self::Rare => 110,
            Self::Epic => 130,
            Self::Legendary => 150,
        }
    }

    /// Item power scaling (percent) for tools and spells of this rarity.
    pub const fn item_power_pct(self) -> i64 {
        match self {
            Self::Common => 100,
            Self::Rare => 110,
            Self::Epic => 130,
            Self::Legendary => 150,
        }
    }

    /// Flat defense added on top of a defensive stance.
    pub const fn defend_bonus(self) -> i32 {
        match self {
            Self::Common => 1,
            Self::Rare => 2,
            Self::Epic => 3,
            Self::Legendary => 5,
        }
    }

    /// Threat weighting used by the opponent planner (percent).
    pub const fn threat_pct(self) -> i64 {
        match self {
            Self::Common => 100,
            Self::Rare => 150,
            Self::Epic => 200,
            Self::Legendary => 300,
        }
    }

    /// Flat deployment value used by the opponent planner.
    pub const fn deploy_bonus(self) -> i64 {
        match self {
            Self::Common => 5,
            Self::Rare => 10,
            Self::Epic => 20,
            Self::Legendary => 30,
        }
    }
}
