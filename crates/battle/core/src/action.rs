//! Intents a side can submit during its turn.

use crate::state::{CreatureId, ItemId};

/// A single intent issued by the active side.
///
/// Actions name creatures and items by id only; the engine resolves them
/// against the current state and rejects anything that does not fit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BattleAction {
    /// Move a creature from hand to field, paying its energy cost.
    Deploy { creature: CreatureId },
    Attack {
        attacker: CreatureId,
        defender: CreatureId,
    },
    /// Use a tool on a creature on the user's own field. Tools are free.
    UseTool { tool: ItemId, target: CreatureId },
    /// Cast a spell; the target defaults to the caster.
    UseSpell {
        spell: ItemId,
        caster: CreatureId,
        #[cfg_attr(feature = "serde", serde(default))]
        target: Option<CreatureId>,
    },
    Defend { creature: CreatureId },
    EndTurn,
}

impl BattleAction {
    /// Short verb used in rejection log lines.
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => "deploy",
            Self::Attack { .. } => "attack",
            Self::UseTool { .. } => "use tool",
            Self::UseSpell { .. } => "cast spell",
            Self::Defend { .. } => "defend",
            Self::EndTurn => "end turn",
        }
    }

    pub const fn is_end_turn(&self) -> bool {
        matches!(self, Self::EndTurn)
    }
}

impl core::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deploy { creature } => write!(f, "deploy {creature}"),
            Self::Attack { attacker, defender } => write!(f, "attack {attacker} -> {defender}"),
            Self::UseTool { tool, target } => write!(f, "tool {tool} -> {target}"),
            Self::UseSpell {
                spell,
                caster,
                target: Some(target),
            } => write!(f, "spell {spell} by {caster} -> {target}"),
            Self::UseSpell {
                spell,
                caster,
                target: None,
            } => write!(f, "spell {spell} by {caster}"),
            Self::Defend { creature } => write!(f, "defend {creature}"),
            Self::EndTurn => f.write_str("end turn"),
        }
    }
}
