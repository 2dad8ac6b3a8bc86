//! Attribute-cycle effectiveness.
//!
//! # Formula
//!
//! ```text
//! g        = strength (physical) | magic (magical)
//! prey     = g.beats()      predator = g.beaten_by()
//!
//! attacker.g > 7 && defender.prey > defender.predator     → 180%
//! defender.predator > 7 && predator > prey                → 60%
//! attacker.g > defender.prey + 2                          → 130%
//! otherwise                                               → 100%
//!
//! secondary edge ×1.2, result clamped to [40%, 250%]
//! ```

use crate::stats::{Attribute, BaseAttributes, DerivedStats};

/// Damage channel of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    Physical,
    Magical,
}

impl Channel {
    /// Physical when physical attack is at least magical attack.
    pub fn preferred(stats: &DerivedStats) -> Self {
        if stats.physical_attack >= stats.magical_attack {
            Self::Physical
        } else {
            Self::Magical
        }
    }

    pub const fn governing(self) -> Attribute {
        match self {
            Self::Physical => Attribute::Strength,
            Self::Magical => Attribute::Magic,
        }
    }

    pub const fn attack(self, stats: &DerivedStats) -> i32 {
        match self {
            Self::Physical => stats.physical_attack,
            Self::Magical => stats.magical_attack,
        }
    }

    pub const fn defense(self, stats: &DerivedStats) -> i32 {
        match self {
            Self::Physical => stats.physical_defense,
            Self::Magical => stats.magical_defense,
        }
    }
}

/// Text band of an effectiveness percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectivenessLabel {
    #[strum(serialize = "devastatingly effective")]
    Devastating,
    #[strum(serialize = "extremely effective")]
    Extreme,
    #[strum(serialize = "super effective")]
    Super,
    #[strum(serialize = "very effective")]
    Very,
    #[strum(serialize = "effective")]
    Effective,
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "somewhat effective")]
    Somewhat,
    #[strum(serialize = "not very effective")]
    NotVery,
    #[strum(serialize = "barely effective")]
    Barely,
}

impl EffectivenessLabel {
    pub const fn from_pct(pct: u32) -> Self {
        if pct >= 200 {
            Self::Devastating
        } else if pct >= 180 {
            Self::Extreme
        } else if pct >= 150 {
            Self::Super
        } else if pct >= 130 {
            Self::Very
        } else if pct >= 110 {
            Self::Effective
        } else if pct <= 40 {
            Self::Barely
        } else if pct <= 60 {
            Self::NotVery
        } else if pct <= 80 {
            Self::Somewhat
        } else {
            Self::Normal
        }
    }
}

/// Effectiveness multiplier with its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effectiveness {
    pub percent: u32,
    pub label: EffectivenessLabel,
}

impl Effectiveness {
    pub const MIN_PCT: u32 = 40;
    pub const MAX_PCT: u32 = 250;
    pub const NEUTRAL: Self = Self::from_pct(100);

    pub const fn from_pct(percent: u32) -> Self {
        let percent = if percent < Self::MIN_PCT {
            Self::MIN_PCT
        } else if percent > Self::MAX_PCT {
            Self::MAX_PCT
        } else {
            percent
        };
        Self {
            percent,
            label: EffectivenessLabel::from_pct(percent),
        }
    }
}

/// Effectiveness of an attack on `channel` between two attribute sets.
///
/// Missing attributes on either side yield neutral effectiveness.
pub fn effectiveness(
    channel: Channel,
    attacker: Option<&BaseAttributes>,
    defender: Option<&BaseAttributes>,
) -> Effectiveness {
    let (Some(attacker), Some(defender)) = (attacker, defender) else {
        return Effectiveness::NEUTRAL;
    };

    let governing = channel.governing();
    let own = attacker.get(governing);
    let prey = defender.get(governing.beats());
    let predator = defender.get(governing.beaten_by());

    let mut percent = if own > 7 && prey > predator {
        180
    } else if predator > 7 && predator > prey {
        60
    } else if own > prey + 2 {
        130
    } else {
        100
    };

    let secondary_edge = match channel {
        Channel::Physical => attacker.speed > defender.speed + 3,
        Channel::Magical => attacker.energy > defender.magic + 3,
    };
    if secondary_edge {
        percent = percent * 120 / 100;
    }

    Effectiveness::from_pct(percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_for_even_attributes() {
        let even = BaseAttributes::uniform(5);
        let e = effectiveness(Channel::Physical, Some(&even), Some(&even));
        assert_eq!(e, Effectiveness::NEUTRAL);
        assert_eq!(e.label.to_string(), "normal");
    }

    #[test]
    fn strong_strength_crushes_stamina_defenders() {
        let attacker = BaseAttributes::new(5, 9, 5, 5, 5);
        let defender = BaseAttributes::new(3, 5, 5, 8, 5);
        let e = effectiveness(Channel::Physical, Some(&attacker), Some(&defender));
        assert_eq!(e.percent, 180);
        assert_eq!(e.label, EffectivenessLabel::Extreme);
    }

    #[test]
    fn predator_attribute_blunts_attack() {
        // magic is beaten by speed
        let attacker = BaseAttributes::new(5, 5, 6, 5, 5);
        let defender = BaseAttributes::new(2, 5, 5, 5, 9);
        let e = effectiveness(Channel::Magical, Some(&attacker), Some(&defender));
        assert_eq!(e.percent, 60);
        assert_eq!(e.label, EffectivenessLabel::NotVery);
    }

    #[test]
    fn secondary_edge_stacks() {
        let attacker = BaseAttributes::new(5, 9, 5, 5, 10);
        let defender = BaseAttributes::new(3, 5, 5, 8, 5);
        let e = effectiveness(Channel::Physical, Some(&attacker), Some(&defender));
        assert_eq!(e.percent, 216);
        assert_eq!(e.label, EffectivenessLabel::Devastating);
    }

    #[test]
    fn missing_attributes_are_neutral() {
        let attacker = BaseAttributes::uniform(9);
        let e = effectiveness(Channel::Magical, Some(&attacker), None);
        assert_eq!(e.percent, 100);
    }

    #[test]
    fn labels_cover_the_low_bands() {
        assert_eq!(EffectivenessLabel::from_pct(72), EffectivenessLabel::Somewhat);
        assert_eq!(EffectivenessLabel::from_pct(40), EffectivenessLabel::Barely);
        assert_eq!(EffectivenessLabel::from_pct(120), EffectivenessLabel::Effective);
    }
}
