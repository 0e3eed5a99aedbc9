//! Decision capabilities and the simple providers.
//!
//! ## Traits
//!
//! - `TargetChooser`: answers the open questions a card asks while picking
//!   targets (which opponent, which organ color)
//! - `DecisionProvider`: everything a seat needs to take a turn
//!
//! The default [`DecisionProvider::decide_turn`] drives a choice-based
//! player: pick play or discard, pick a card, let the card pick targets by
//! asking the provider. Strategies that plan whole turns override it.
//!
//! ## Providers
//!
//! - `RandomProvider`: uniform random choices from a `GameRng`
//! - `ScriptedProvider`: replays queued answers; for tests and for
//!   policies computed outside the engine

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::cards::{Card, Color};
use crate::core::action::{Decision, TurnAction};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;

/// Target selection for card plays.
pub trait TargetChooser {
    /// Pick the opponent `card` should affect.
    fn decide_opponent(&mut self, state: &GameState, player: PlayerId, card: &Card) -> Option<PlayerId>;

    /// Pick an organ color in `body_owner`'s body for `card`.
    fn decide_organ_color(
        &mut self,
        state: &GameState,
        player: PlayerId,
        card: &Card,
        body_owner: PlayerId,
    ) -> Option<Color>;
}

/// Everything a seat decides on its turn.
pub trait DecisionProvider: TargetChooser {
    fn decide_action(&mut self, state: &GameState, player: PlayerId) -> TurnAction;

    fn decide_card_to_play_index(&mut self, state: &GameState, player: PlayerId) -> usize;

    fn decide_cards_to_discard_indices(&mut self, state: &GameState, player: PlayerId) -> Vec<usize>;

    /// Produce the complete decision for this turn.
    ///
    /// A card index outside the hand is a fault.
    fn decide_turn(&mut self, state: &GameState, player: PlayerId) -> Result<Decision, EngineError> {
        match self.decide_action(state, player) {
            TurnAction::Play => {
                let hand_index = self.decide_card_to_play_index(state, player);
                let card = state.player(player)?.hand_card(hand_index)?;
                let moves = card.prepare_moves(state, player, self);
                Ok(Decision::Play { hand_index, moves })
            }
            TurnAction::Discard => Ok(Decision::Discard {
                hand_indices: self.decide_cards_to_discard_indices(state, player),
            }),
        }
    }
}

/// Uniformly random player.
#[derive(Clone, Debug)]
pub struct RandomProvider {
    rng: GameRng,
    play_probability: f64,
}

impl RandomProvider {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng, play_probability: 0.5 }
    }

    /// Chance of playing rather than discarding.
    #[must_use]
    pub fn with_play_probability(mut self, probability: f64) -> Self {
        self.play_probability = probability.clamp(0.0, 1.0);
        self
    }

    fn hand_len(state: &GameState, player: PlayerId) -> usize {
        state.player(player).map_or(0, |p| p.hand().len())
    }
}

impl TargetChooser for RandomProvider {
    fn decide_opponent(&mut self, state: &GameState, player: PlayerId, _card: &Card) -> Option<PlayerId> {
        let opponents: SmallVec<[PlayerId; 6]> = state.opponents(player).collect();
        self.rng.choose(&opponents).copied()
    }

    fn decide_organ_color(
        &mut self,
        state: &GameState,
        _player: PlayerId,
        _card: &Card,
        body_owner: PlayerId,
    ) -> Option<Color> {
        let colors = state.player(body_owner).ok()?.colors();
        self.rng.choose(&colors).copied()
    }
}

impl DecisionProvider for RandomProvider {
    fn decide_action(&mut self, state: &GameState, player: PlayerId) -> TurnAction {
        if Self::hand_len(state, player) > 0 && self.rng.gen_bool(self.play_probability) {
            TurnAction::Play
        } else {
            TurnAction::Discard
        }
    }

    fn decide_card_to_play_index(&mut self, state: &GameState, player: PlayerId) -> usize {
        self.rng.gen_range_usize(0..Self::hand_len(state, player).max(1))
    }

    fn decide_cards_to_discard_indices(&mut self, state: &GameState, player: PlayerId) -> Vec<usize> {
        let len = Self::hand_len(state, player);
        let mut indices: Vec<usize> = (0..len).filter(|_| self.rng.gen_bool(0.5)).collect();
        if indices.is_empty() && len > 0 {
            indices.push(self.rng.gen_range_usize(0..len));
        }
        indices
    }
}

/// Replays queued answers, falling back to simple defaults when a queue
/// runs dry.
///
/// ## Example
///
/// ```
/// use virus_engine::ai::ScriptedProvider;
/// use virus_engine::core::TurnAction;
///
/// let provider = ScriptedProvider::new()
///     .with_actions([TurnAction::Discard])
///     .with_discards([vec![0, 2]]);
/// # let _ = provider;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    actions: VecDeque<TurnAction>,
    card_indices: VecDeque<usize>,
    discards: VecDeque<Vec<usize>>,
    opponents: VecDeque<PlayerId>,
    colors: VecDeque<Color>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue play/discard choices. Defaults to `Play`.
    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = TurnAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Queue hand indices to play. Defaults to 0.
    #[must_use]
    pub fn with_card_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.card_indices.extend(indices);
        self
    }

    /// Queue discard sets. Defaults to the first card.
    #[must_use]
    pub fn with_discards(mut self, discards: impl IntoIterator<Item = Vec<usize>>) -> Self {
        self.discards.extend(discards);
        self
    }

    /// Queue opponent choices. Defaults to the first opponent.
    #[must_use]
    pub fn with_opponents(mut self, opponents: impl IntoIterator<Item = PlayerId>) -> Self {
        self.opponents.extend(opponents);
        self
    }

    /// Queue organ color choices, own and opponent alike, in the order the
    /// cards ask for them. Defaults to the first organ in the body.
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.actions.len() + self.card_indices.len() + self.discards.len() + self.opponents.len() + self.colors.len()
    }
}

impl TargetChooser for ScriptedProvider {
    fn decide_opponent(&mut self, state: &GameState, player: PlayerId, _card: &Card) -> Option<PlayerId> {
        self.opponents.pop_front().or_else(|| state.opponents(player).next())
    }

    fn decide_organ_color(
        &mut self,
        state: &GameState,
        _player: PlayerId,
        _card: &Card,
        body_owner: PlayerId,
    ) -> Option<Color> {
        self.colors
            .pop_front()
            .or_else(|| state.player(body_owner).ok()?.colors().first().copied())
    }
}

impl DecisionProvider for ScriptedProvider {
    fn decide_action(&mut self, _state: &GameState, _player: PlayerId) -> TurnAction {
        self.actions.pop_front().unwrap_or(TurnAction::Play)
    }

    fn decide_card_to_play_index(&mut self, _state: &GameState, _player: PlayerId) -> usize {
        self.card_indices.pop_front().unwrap_or(0)
    }

    fn decide_cards_to_discard_indices(&mut self, _state: &GameState, _player: PlayerId) -> Vec<usize> {
        self.discards.pop_front().unwrap_or_else(|| vec![0])
    }
}
