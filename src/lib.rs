//! # virus-engine
//!
//! A rules engine and computer players for the Virus! card game.
//!
//! ## Design Principles
//!
//! 1. **Table-Driven Organs**: Organ states change only through one
//!    transition table. Attachments are never mutated ad hoc.
//!
//! 2. **N-Player First**: Every API takes a `PlayerId`. Nothing assumes
//!    two seats.
//!
//! 3. **Faults Are Errors, Failures Are Not**: A card that cannot take
//!    effect is a `false`. A state the rules forbid is an `EngineError`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Cheap cloning via `im-rs`, so the
//!   lookahead player can simulate every candidate move on its own copy.
//!
//! - **Pluggable Seats**: Each seat is driven by a `DecisionProvider`.
//!   Card resolution asks the active seat for targets through the same
//!   trait.
//!
//! - **Deterministic Seeds**: Shuffles, seat order and random players all
//!   draw from `GameRng` streams derived from one seed.
//!
//! ## Modules
//!
//! - `core`: Card and player IDs, state, moves, RNG, configuration, errors
//! - `cards`: Card kinds, organs, the deck
//! - `rules`: Organ transitions, card resolution, turns
//! - `ai`: Decision providers and strategies
//! - `game`: Builder, turn controller, presenters

pub mod ai;
pub mod cards;
pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CardId, Decision, DeckComposition, EngineError, GameConfig, GameRng, GameState, Move, MoveRecord, Moves, Player,
    PlayerId, PlayerMap, TurnAction,
};

pub use crate::cards::{Card, CardKind, CardType, Color, Deck, Organ, OrganChange, OrganOutcome, Treatment};

pub use crate::rules::{
    can_steal, can_transplant, discard_cards, resolve_play, take_turn, transition, transmissible_virus, OrganEffect,
    OrganEvent, OrganState, Transition, TurnOutcome,
};

pub use crate::ai::{
    discard_indices, organ_balance, Candidate, DecisionProvider, LookaheadConfig, LookaheadStrategy, RandomProvider,
    Rule, RuleBasedStrategy, ScriptedProvider, SearchStats, TargetChooser,
};

pub use crate::game::{BlankPresenter, Game, GameBuilder, GameSummary, Presenter, TracingPresenter};
