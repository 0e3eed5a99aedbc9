//! Running games.
//!
//! - `GameBuilder`: roster, seed and configuration in; a ready `Game` out
//! - `Game`: the turn controller
//! - `Presenter`: where the controller reports what happens

mod builder;
mod controller;
mod presenter;

pub use builder::GameBuilder;
pub use controller::{Game, GameSummary};
pub use presenter::{BlankPresenter, Presenter, TracingPresenter};
