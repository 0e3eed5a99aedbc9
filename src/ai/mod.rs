//! Decision making for non-human seats.
//!
//! ## Key Types
//!
//! - `TargetChooser` / `DecisionProvider`: the capability a seat plugs in
//! - `RandomProvider`, `ScriptedProvider`: choice-driven providers
//! - `Rule`: heuristic play rules, each proposing one `Candidate`
//! - `RuleBasedStrategy`: first applicable rule wins
//! - `LookaheadStrategy`: simulate every rule on a cloned state, play the best
//!
//! ## Usage
//!
//! ```
//! use virus_engine::ai::{DecisionProvider, LookaheadStrategy};
//! use virus_engine::core::{GameConfig, GameRng, GameState, PlayerId};
//!
//! let mut state = GameState::new(["a", "b"], GameConfig::default(), GameRng::new(7));
//! state.complete_hand(PlayerId::new(0)).unwrap();
//!
//! let mut strategy = LookaheadStrategy::default();
//! let decision = strategy.decide_turn(&state, PlayerId::new(0)).unwrap();
//! # let _ = decision;
//! ```

pub mod config;
pub mod lookahead;
pub mod provider;
pub mod rule_based;
pub mod rules;
pub mod stats;

pub use config::LookaheadConfig;
pub use lookahead::{organ_balance, LookaheadStrategy};
pub use provider::{DecisionProvider, RandomProvider, ScriptedProvider, TargetChooser};
pub use rule_based::RuleBasedStrategy;
pub use rules::{discard_indices, Candidate, Rule};
pub use stats::SearchStats;
