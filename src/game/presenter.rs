//! Presentation sink.
//!
//! The controller reports what happens through a `Presenter`. Every method
//! has a no-op default, so a presenter only implements what it shows.
//! Presenters observe; they cannot change the game.

use tracing::info;

use crate::cards::Card;
use crate::core::action::Decision;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Receives game events as they happen.
pub trait Presenter {
    /// A seat is about to act; its hand is full.
    fn print_state(&mut self, _state: &GameState) {}

    fn print_decision(&mut self, _player: PlayerId, _decision: &Decision) {}

    fn print_card(&mut self, _player: PlayerId, _card: &Card) {}

    fn print_game_over(&mut self, _winner: PlayerId, _name: &str) {}
}

/// Shows nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlankPresenter;

impl Presenter for BlankPresenter {}

/// Reports events as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn print_state(&mut self, state: &GameState) {
        let current = state.current_player();
        if let Ok(player) = state.player(current) {
            let body: Vec<String> = player.body().map(ToString::to_string).collect();
            let hand: Vec<String> = player.hand().iter().map(Card::name).collect();
            info!(
                turn = state.turn_number,
                player = %current,
                name = player.name(),
                body = ?body,
                hand = ?hand,
                deck = state.deck.len(),
                "turn start"
            );
        }
    }

    fn print_decision(&mut self, player: PlayerId, decision: &Decision) {
        info!(player = %player, action = %decision.action(), "decision");
    }

    fn print_card(&mut self, player: PlayerId, card: &Card) {
        info!(player = %player, card = %card, "card played");
    }

    fn print_game_over(&mut self, winner: PlayerId, name: &str) {
        info!(winner = %winner, name, "game over");
    }
}
