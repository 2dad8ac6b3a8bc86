use super::{BattleEngine, actor_label};
use crate::economy;
use crate::effects::{self, TickScaling};
use crate::state::Side;

/// End-of-turn sequencing for BattleEngine.
impl BattleEngine<'_> {
    /// Close `side`'s turn and open the other side's.
    ///
    /// Ticks the outgoing field, runs cleanup and the terminal check, flips
    /// the active side (advancing the turn number when play returns to the
    /// player) and then begins the incoming side's turn.
    pub(super) fn end_turn(&mut self, side: Side) {
        self.state.push_log(match side {
            Side::Player => "You ended your turn.",
            Side::Opponent => "Enemy ended their turn.",
        });

        self.tick_field(side);
        self.after_action();
        if self.state.phase.is_terminal() {
            return;
        }

        let incoming = side.opposite();
        self.state.active_side = incoming;
        if incoming == Side::Player {
            self.state.turn += 1;
        }
        self.begin_turn(incoming);
    }

    /// Advance every effect on `side`'s field by one owning-side turn.
    fn tick_field(&mut self, side: Side) {
        let scaling = TickScaling::new(self.state.profile.tick_health_pct);
        let field = core::mem::take(&mut self.state.side_mut(side).field);

        let mut ticked = Vec::with_capacity(field.len());
        for creature in field {
            let (creature, lines) = effects::tick(creature, scaling);
            for line in lines {
                self.state.push_log(line);
            }
            ticked.push(creature);
        }
        self.state.side_mut(side).field = ticked;
    }

    /// Start-of-turn bookkeeping: drop defensive stances, draw, regenerate.
    fn begin_turn(&mut self, side: Side) {
        let turn = self.state.turn;
        self.state.push_log(match side {
            Side::Player => format!("Turn {turn} - Your turn."),
            Side::Opponent => format!("Turn {turn} - Enemy's turn."),
        });

        let max_hand = self.state.profile.max_hand_size;
        let own = self.state.side_mut(side);
        own.field = core::mem::take(&mut own.field)
            .into_iter()
            .map(effects::clear_defending)
            .collect();

        if own.hand.len() < max_hand && !own.deck.is_empty() {
            let card = own.deck.remove(0);
            let line = match side {
                Side::Player => format!("You drew {}.", card.species_name),
                Side::Opponent => "Enemy drew a card.".to_string(),
            };
            own.hand.push(card);
            self.state.push_log(line);
        }

        let amount = economy::regen(
            self.state.side(side),
            &self.state.profile,
            side == Side::Opponent,
        );
        let max = self.state.max_energy(side);
        let own = self.state.side_mut(side);
        let before = own.energy;
        own.energy = economy::gain(own.energy, amount, max);
        let gained = own.energy - before;
        self.state.push_log(format!(
            "{} gained +{gained} energy.",
            actor_label(side)
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::action::BattleAction;
    use crate::effects::{ActiveEffect, EffectKind, attach};
    use crate::engine::{OpponentConfig, SideSetup, execute, start_battle, submit_action};
    use crate::env::FixedRng;
    use crate::state::{BattleState, CreatureId, CreatureSpec, Side};
    use crate::stats::{BaseAttributes, CreatureProfile};

    fn spec(id: u32) -> CreatureSpec {
        CreatureSpec::new(
            id,
            format!("Creature {id}"),
            CreatureProfile {
                attributes: Some(BaseAttributes::uniform(5)),
                ..CreatureProfile::default()
            },
        )
    }

    fn battle() -> BattleState {
        let player = SideSetup {
            field: vec![spec(1)],
            deck: vec![spec(2), spec(3)],
            ..SideSetup::default()
        };
        let opponent = OpponentConfig {
            setup: SideSetup {
                field: vec![spec(10)],
                deck: vec![spec(11)],
                ..SideSetup::default()
            },
            ..OpponentConfig::default()
        };
        match start_battle(player, opponent, 11) {
            Ok(state) => state,
            Err(err) => panic!("setup failed: {err}"),
        }
    }

    #[test]
    fn end_turn_hands_over_to_opponent() {
        let state = battle();
        let out = submit_action(&state, &BattleAction::EndTurn, &FixedRng::NEUTRAL);

        assert!(out.is_accepted());
        assert_eq!(out.state.active_side, Side::Opponent);
        assert_eq!(out.state.turn, 1);
        // opponent drew its only deck card
        assert_eq!(out.state.opponent.hand.len(), 1);
        assert!(out.state.opponent.deck.is_empty());
        // 4 base + round(5 × 0.3) + 1 opponent bonus
        assert_eq!(out.state.opponent.energy, 12 + 7);
    }

    #[test]
    fn turn_advances_when_play_returns_to_player() {
        let state = battle();
        let state = submit_action(&state, &BattleAction::EndTurn, &FixedRng::NEUTRAL).state;
        let out = execute(&state, Side::Opponent, &BattleAction::EndTurn, &FixedRng::NEUTRAL);

        assert_eq!(out.state.active_side, Side::Player);
        assert_eq!(out.state.turn, 2);
        assert_eq!(out.state.player.hand[0].id, CreatureId(2));
        assert_eq!(out.state.player.energy, 12 + 6);
    }

    #[test]
    fn only_the_outgoing_side_ticks() {
        let mut state = battle();
        let burn = ActiveEffect::new("Burn", EffectKind::Dot, 1).with_health_per_tick(-5);
        state.player.field[0] = attach(state.player.field[0].clone(), burn.clone());
        state.opponent.field[0] = attach(state.opponent.field[0].clone(), burn);
        let player_health = state.player.field[0].current_health;
        let opponent_health = state.opponent.field[0].current_health;

        let out = submit_action(&state, &BattleAction::EndTurn, &FixedRng::NEUTRAL);
        assert_eq!(out.state.player.field[0].current_health, player_health - 5);
        assert!(out.state.player.field[0].effects.is_empty());
        assert_eq!(out.state.opponent.field[0].current_health, opponent_health);
        assert_eq!(out.state.opponent.field[0].effects.len(), 1);
    }

    #[test]
    fn defensive_stance_lasts_until_owner_turn_starts() {
        let state = battle();
        let defend = BattleAction::Defend {
            creature: CreatureId(1),
        };
        let state = submit_action(&state, &defend, &FixedRng::NEUTRAL).state;
        let state = submit_action(&state, &BattleAction::EndTurn, &FixedRng::NEUTRAL).state;
        assert!(state.player.field[0].is_defending);

        let state = execute(&state, Side::Opponent, &BattleAction::EndTurn, &FixedRng::NEUTRAL).state;
        assert!(!state.player.field[0].is_defending);
        assert!(state.player.field[0].effects.is_empty());
    }
}
