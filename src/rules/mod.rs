//! Game rules.
//!
//! - `transitions`: the organ state machine table
//! - `resolution`: what each card can target and what playing it does
//! - `turn`: carrying out a seat's decision and recording it
//!
//! Nothing here decides what to play; that is the job of [`crate::ai`].

pub mod resolution;
pub mod transitions;
pub mod turn;

pub use resolution::{can_steal, can_transplant, resolve_play, transmissible_virus};
pub use transitions::{transition, OrganEffect, OrganEvent, OrganState, Transition};
pub use turn::{discard_cards, take_turn, TurnOutcome};
