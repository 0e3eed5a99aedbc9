//! Game setup.

use super::controller::Game;
use super::presenter::{BlankPresenter, Presenter};
use crate::ai::DecisionProvider;
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;

/// Builder for creating a [`Game`].
///
/// ## Example
///
/// ```
/// use virus_engine::ai::{LookaheadStrategy, RuleBasedStrategy};
/// use virus_engine::game::GameBuilder;
///
/// let mut game = GameBuilder::new()
///     .seed(42)
///     .seat("Alice", LookaheadStrategy::default())
///     .seat("Bob", RuleBasedStrategy::new())
///     .build()
///     .unwrap();
///
/// let summary = game.run().unwrap();
/// assert!(summary.turns > 0);
/// ```
pub struct GameBuilder {
    seed: u64,
    config: GameConfig,
    seats: Vec<(String, Box<dyn DecisionProvider>)>,
    starting_player: Option<PlayerId>,
    presenter: Box<dyn Presenter>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            config: GameConfig::default(),
            seats: Vec::new(),
            starting_player: None,
            presenter: Box::new(BlankPresenter),
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for the deck shuffle and the starting seat.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a seat. Seats are numbered in the order they are added.
    pub fn seat(self, name: impl Into<String>, provider: impl DecisionProvider + 'static) -> Self {
        self.boxed_seat(name, Box::new(provider))
    }

    /// Add a seat whose provider is already boxed.
    pub fn boxed_seat(mut self, name: impl Into<String>, provider: Box<dyn DecisionProvider>) -> Self {
        self.seats.push((name.into(), provider));
        self
    }

    /// Fix the first seat to act. `None` picks one at random from the seed.
    pub fn starting_player(mut self, player: Option<PlayerId>) -> Self {
        self.starting_player = player;
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Validate the roster, shuffle the deck and pick the first seat.
    pub fn build(self) -> Result<Game, EngineError> {
        let count = self.seats.len();
        if !self.config.accepts_player_count(count) {
            return Err(EngineError::InvalidPlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }

        let rng = GameRng::new(self.seed);
        let (names, providers): (Vec<String>, Vec<Box<dyn DecisionProvider>>) = self.seats.into_iter().unzip();

        let mut state = GameState::new(names, self.config, rng.for_context("play"));
        state.deck.shuffle(&mut rng.for_context("deck"));

        let first = match self.starting_player {
            Some(player) => player,
            None => PlayerId::new(rng.for_context("seats").gen_range_usize(0..count) as u8),
        };
        state.set_current_player(first)?;

        Ok(Game::new(state, providers, self.presenter))
    }
}
