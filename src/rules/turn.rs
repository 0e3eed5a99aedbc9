//! Executing one decision for one seat.
//!
//! `take_turn` asks the seat's provider for a decision, carries it out and
//! appends the outcome to the seat's move history. Drawing, the win check
//! and passing the turn belong to the controller in [`crate::game`].

use tracing::debug;

use super::resolution::resolve_play;
use crate::ai::DecisionProvider;
use crate::cards::Card;
use crate::core::action::{Decision, MoveRecord};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// What happened on a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub decision: Decision,
    /// Card that was played, for play decisions.
    pub card: Option<Card>,
    pub succeeded: bool,
}

/// Let `player` decide and act once.
pub fn take_turn<P: DecisionProvider + ?Sized>(
    state: &mut GameState,
    player: PlayerId,
    provider: &mut P,
) -> Result<TurnOutcome, EngineError> {
    let decision = provider.decide_turn(state, player)?;

    let (card, succeeded) = match &decision {
        Decision::Play { hand_index, moves } => {
            let card = state.player(player)?.hand_card(*hand_index)?;
            let succeeded = resolve_play(state, player, *hand_index, moves)?;
            (Some(card), succeeded)
        }
        Decision::Discard { hand_indices } => (None, discard_cards(state, player, hand_indices)?),
    };

    if !succeeded {
        debug!(player = %player, action = %decision.action(), "turn failed");
    }

    let record = MoveRecord::new(state.turn_number, decision.action(), card.map(|c| c.kind), succeeded);
    state.player_mut(player)?.record(record);

    Ok(TurnOutcome { decision, card, succeeded })
}

/// Move the cards at `indices` from the hand to the discard pile.
///
/// Indices are removed highest first so earlier ones stay valid; repeats
/// count once. Discarding nothing is a failed turn.
pub fn discard_cards(state: &mut GameState, player: PlayerId, indices: &[usize]) -> Result<bool, EngineError> {
    if indices.is_empty() {
        return Ok(false);
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let hand_size = state.player(player)?.hand().len();
    if let Some(&index) = sorted.first().filter(|&&i| i >= hand_size) {
        return Err(EngineError::HandIndexOutOfRange { index, hand_size });
    }

    for index in sorted {
        let card = state.player_mut(player)?.remove_hand_card(index)?;
        state.deck.discard(card);
    }
    Ok(true)
}
