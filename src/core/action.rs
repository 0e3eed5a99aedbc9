//! Moves, decisions and the move history.
//!
//! A card play is the card (by hand index) plus a list of `Move`s. Each move
//! is a set of optional pointers (the "nouns") the card interprets:
//! - Organ, LatexGlove: no pointers
//! - Medicine: `player_organ`
//! - Virus, OrganThief: `opponent` + `opponent_organ`
//! - Transplant: all three
//! - Contagion: one move per virus, each with all three
//! - MedicalError: `opponent`
//!
//! Moves only hold ids, so a list computed against one game state can be
//! replayed against a clone of it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::CardId;
use super::player::PlayerId;
use crate::cards::CardKind;

/// Resolved targets for one card application.
///
/// ## Example
///
/// ```
/// use virus_engine::core::{CardId, Move, PlayerId};
///
/// let attack = Move::against(PlayerId::new(1), CardId(12));
/// assert_eq!(attack.opponent, Some(PlayerId::new(1)));
/// assert_eq!(attack.player_organ, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub opponent: Option<PlayerId>,
    pub player_organ: Option<CardId>,
    pub opponent_organ: Option<CardId>,
}

impl Move {
    /// A move with no targets.
    #[must_use]
    pub const fn untargeted() -> Self {
        Self { opponent: None, player_organ: None, opponent_organ: None }
    }

    /// Target one of the owner's organs.
    #[must_use]
    pub const fn on_own(organ: CardId) -> Self {
        Self { opponent: None, player_organ: Some(organ), opponent_organ: None }
    }

    /// Target an opponent's organ.
    #[must_use]
    pub const fn against(opponent: PlayerId, organ: CardId) -> Self {
        Self { opponent: Some(opponent), player_organ: None, opponent_organ: Some(organ) }
    }

    /// Target an opponent as a whole.
    #[must_use]
    pub const fn with_opponent(opponent: PlayerId) -> Self {
        Self { opponent: Some(opponent), player_organ: None, opponent_organ: None }
    }

    /// Pair one of the owner's organs with an opponent's organ.
    #[must_use]
    pub const fn exchange(opponent: PlayerId, own: CardId, theirs: CardId) -> Self {
        Self { opponent: Some(opponent), player_organ: Some(own), opponent_organ: Some(theirs) }
    }
}

/// Move list of one card play. Almost always one entry.
pub type Moves = SmallVec<[Move; 2]>;

/// The two things a player can do on a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    Play,
    Discard,
}

impl std::fmt::Display for TurnAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnAction::Play => f.write_str("play"),
            TurnAction::Discard => f.write_str("discard"),
        }
    }
}

/// A fully resolved turn decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Play the card at `hand_index` with these moves.
    Play { hand_index: usize, moves: Moves },
    /// Discard the cards at these hand indices.
    Discard { hand_indices: Vec<usize> },
}

impl Decision {
    #[must_use]
    pub fn action(&self) -> TurnAction {
        match self {
            Decision::Play { .. } => TurnAction::Play,
            Decision::Discard { .. } => TurnAction::Discard,
        }
    }
}

/// One entry of a player's move history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number the move was made on.
    pub turn: u32,
    pub action: TurnAction,
    /// The played card; `None` for discards.
    pub card: Option<CardKind>,
    pub succeeded: bool,
}

impl MoveRecord {
    #[must_use]
    pub fn new(turn: u32, action: TurnAction, card: Option<CardKind>, succeeded: bool) -> Self {
        Self { turn, action, card, succeeded }
    }
}
