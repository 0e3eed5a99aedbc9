//! Turn controller.
//!
//! Each step runs one seat's turn:
//!
//! 1. Fail if the turn ceiling is reached
//! 2. Refill the seat's hand to full
//! 3. Ask its provider for a decision and carry it out
//! 4. After a successful play, check whether the seat has won
//! 5. Otherwise pass the turn on

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::presenter::Presenter;
use crate::ai::DecisionProvider;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::take_turn;

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: PlayerId,
    pub name: String,
    /// Turns played, the winning one included.
    pub turns: u32,
}

/// A game in progress: state plus one provider per seat.
pub struct Game {
    state: GameState,
    providers: Vec<Box<dyn DecisionProvider>>,
    presenter: Box<dyn Presenter>,
    winner: Option<PlayerId>,
}

impl Game {
    pub(crate) fn new(
        state: GameState,
        providers: Vec<Box<dyn DecisionProvider>>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            state,
            providers,
            presenter,
            winner: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access, for setting up positions.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Play one turn. Returns the winner once there is one.
    pub fn step(&mut self) -> Result<Option<PlayerId>, EngineError> {
        if self.winner.is_some() {
            return Ok(self.winner);
        }

        let max_turns = self.state.config.max_turns;
        if self.state.turn_number >= max_turns {
            warn!(turns = max_turns, "turn ceiling reached without a winner");
            return Err(EngineError::TurnLimitExceeded { turns: max_turns });
        }

        let player = self.state.current_player();
        self.state.turn_number += 1;
        self.state.complete_hand(player)?;
        self.presenter.print_state(&self.state);

        let provider = self
            .providers
            .get_mut(player.index())
            .ok_or(EngineError::UnknownPlayer(player))?;
        let outcome = take_turn(&mut self.state, player, provider.as_mut())?;

        self.presenter.print_decision(player, &outcome.decision);
        if let Some(card) = &outcome.card {
            self.presenter.print_card(player, card);
        }
        debug!(turn = self.state.turn_number, player = %player, succeeded = outcome.succeeded, "turn done");

        if outcome.succeeded && self.state.has_won(player)? {
            let name = self.state.player(player)?.name().to_string();
            info!(winner = %player, name = %name, turns = self.state.turn_number, "game won");
            self.presenter.print_game_over(player, &name);
            self.winner = Some(player);
            return Ok(self.winner);
        }

        self.state.next_player();
        Ok(None)
    }

    /// Play until someone wins.
    pub fn run(&mut self) -> Result<GameSummary, EngineError> {
        loop {
            if let Some(winner) = self.step()? {
                return Ok(GameSummary {
                    winner,
                    name: self.state.player(winner)?.name().to_string(),
                    turns: self.state.turn_number,
                });
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.state.player_count())
            .field("turn", &self.state.turn_number)
            .field("current", &self.state.current_player())
            .field("winner", &self.winner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{RandomProvider, RuleBasedStrategy};
    use crate::cards::Card;
    use crate::core::action::Decision;
    use crate::core::config::GameConfig;
    use crate::core::rng::GameRng;
    use crate::game::GameBuilder;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        states: usize,
        decisions: usize,
        cards: usize,
        winner: Option<PlayerId>,
    }

    struct Recording(Rc<RefCell<Log>>);

    impl Presenter for Recording {
        fn print_state(&mut self, state: &GameState) {
            assert_eq!(state.player(state.current_player()).unwrap().hand().len(), 3);
            self.0.borrow_mut().states += 1;
        }

        fn print_decision(&mut self, _player: PlayerId, _decision: &Decision) {
            self.0.borrow_mut().decisions += 1;
        }

        fn print_card(&mut self, _player: PlayerId, _card: &Card) {
            self.0.borrow_mut().cards += 1;
        }

        fn print_game_over(&mut self, winner: PlayerId, _name: &str) {
            self.0.borrow_mut().winner = Some(winner);
        }
    }

    fn rule_game(seed: u64) -> GameBuilder {
        GameBuilder::new()
            .seed(seed)
            .seat("Alice", RuleBasedStrategy::new())
            .seat("Bob", RuleBasedStrategy::new())
    }

    #[test]
    fn test_game_to_completion() {
        let mut game = rule_game(42).build().unwrap();
        let summary = game.run().unwrap();

        assert!(game.is_over());
        assert_eq!(game.winner(), Some(summary.winner));
        assert!(game.state().has_won(summary.winner).unwrap());
        assert_eq!(game.state().card_count(), 68);
        assert!(summary.turns > 0);
    }

    #[test]
    fn test_deterministic_replay() {
        let a = rule_game(123).build().unwrap().run().unwrap();
        let b = rule_game(123).build().unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_after_win_is_stable() {
        let mut game = rule_game(5).build().unwrap();
        let summary = game.run().unwrap();
        let turns = game.state().turn_number;

        assert_eq!(game.step().unwrap(), Some(summary.winner));
        assert_eq!(game.state().turn_number, turns);
    }

    #[test]
    fn test_turn_limit() {
        let mut game = rule_game(9)
            .config(GameConfig::default().with_max_turns(2))
            .build()
            .unwrap();
        assert_eq!(game.run().unwrap_err(), EngineError::TurnLimitExceeded { turns: 2 });
        assert_eq!(game.state().turn_number, 2);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = rule_game(3).starting_player(Some(PlayerId::new(1))).build().unwrap();
        game.step().unwrap();
        assert_eq!(game.state().current_player(), PlayerId::new(0));
        game.step().unwrap();
        assert_eq!(game.state().current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_presenter_sees_every_turn() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut game = GameBuilder::new()
            .seed(11)
            .seat("a", RandomProvider::new(GameRng::new(1)))
            .seat("b", RandomProvider::new(GameRng::new(2)))
            .seat("c", RuleBasedStrategy::new())
            .presenter(Recording(Rc::clone(&log)))
            .build()
            .unwrap();

        let summary = game.run().unwrap();
        let log = log.borrow();
        assert_eq!(log.states, summary.turns as usize);
        assert_eq!(log.decisions, summary.turns as usize);
        assert!(log.cards <= log.decisions);
        assert_eq!(log.winner, Some(summary.winner));
    }
}
