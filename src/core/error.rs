//! Engine faults.
//!
//! Expected game outcomes (a virus hitting an immunised organ, a card with
//! no legal target) are plain `bool`s and never show up here. An
//! `EngineError` means the engine reached a state the rules forbid; the
//! game run that produced it should be aborted.

use thiserror::Error;

use super::entity::CardId;
use super::player::PlayerId;
use crate::rules::transitions::{OrganEvent, OrganState};

/// Fatal engine fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An organ carries a virus/medicine combination no transition produces.
    #[error("organ has impossible attachments: {viruses} viruses, {medicines} medicines")]
    InvalidOrganState { viruses: usize, medicines: usize },

    /// The organ state machine has no transition for this event.
    #[error("no transition from {state:?} on {event:?}")]
    InvalidTransition { state: OrganState, event: OrganEvent },

    /// The turn loop passed its safety ceiling.
    #[error("game did not finish after {turns} turns")]
    TurnLimitExceeded { turns: u32 },

    /// A decision referred to a hand slot that does not exist.
    #[error("hand index {index} out of range for hand of {hand_size}")]
    HandIndexOutOfRange { index: usize, hand_size: usize },

    /// The roster is outside the supported player range.
    #[error("{count} players configured, expected {min}..={max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    /// Both the deck and the discard pile are empty.
    #[error("cannot draw: deck and discard pile are both empty")]
    DeckExhausted,

    /// A move referred to a seat that is not in the game.
    #[error("unknown seat {0}")]
    UnknownPlayer(PlayerId),

    /// A move referred to an organ that is not in the expected body.
    #[error("{organ} is not in the body of {player}")]
    UnknownOrgan { player: PlayerId, organ: CardId },
}
