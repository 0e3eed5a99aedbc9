//! Core engine types: card ids, players, state, moves, RNG, configuration,
//! errors.
//!
//! Everything here is plain data plus the operations that keep it
//! consistent. Card behavior lives in `rules`, decisions in `ai`.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Decision, Move, MoveRecord, Moves, TurnAction};
pub use config::{DeckComposition, GameConfig};
pub use entity::CardId;
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, Player};
