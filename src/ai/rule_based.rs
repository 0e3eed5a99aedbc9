//! Rule-ordered strategy: play the first rule that proposes something,
//! otherwise discard.

use tracing::debug;

use super::provider::{DecisionProvider, TargetChooser};
use super::rules::{discard_indices, Candidate, Rule};
use crate::cards::{Card, Color};
use crate::core::action::{Decision, TurnAction};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Plays the first applicable rule in a fixed order.
#[derive(Clone, Debug)]
pub struct RuleBasedStrategy {
    rules: Vec<Rule>,
}

impl Default for RuleBasedStrategy {
    fn default() -> Self {
        Self {
            rules: Rule::RULE_BASED_ORDER.to_vec(),
        }
    }
}

impl RuleBasedStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom rule order.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule with a non-empty proposal, and that proposal.
    pub fn first_candidate(&self, state: &GameState, player: PlayerId) -> Result<Option<(Rule, Candidate)>, EngineError> {
        for &rule in &self.rules {
            if let Some(candidate) = rule.apply(state, player)? {
                if !candidate.moves.is_empty() {
                    return Ok(Some((rule, candidate)));
                }
            }
        }
        Ok(None)
    }
}

/// The opponent with the largest body; first seat on ties.
pub(crate) fn largest_body_opponent(state: &GameState, player: PlayerId) -> Option<PlayerId> {
    let mut best: Option<(PlayerId, usize)> = None;
    for opp in state.opponents(player) {
        let len = state.player(opp).map_or(0, |p| p.body_len());
        if best.map_or(true, |(_, n)| len > n) {
            best = Some((opp, len));
        }
    }
    best.map(|(opp, _)| opp)
}

/// The first organ color in `body_owner`'s body.
pub(crate) fn first_organ_color(state: &GameState, body_owner: PlayerId) -> Option<Color> {
    state.player(body_owner).ok()?.colors().first().copied()
}

impl TargetChooser for RuleBasedStrategy {
    fn decide_opponent(&mut self, state: &GameState, player: PlayerId, _card: &Card) -> Option<PlayerId> {
        largest_body_opponent(state, player)
    }

    fn decide_organ_color(
        &mut self,
        state: &GameState,
        _player: PlayerId,
        _card: &Card,
        body_owner: PlayerId,
    ) -> Option<Color> {
        first_organ_color(state, body_owner)
    }
}

impl DecisionProvider for RuleBasedStrategy {
    fn decide_action(&mut self, state: &GameState, player: PlayerId) -> TurnAction {
        match self.first_candidate(state, player) {
            Ok(Some(_)) => TurnAction::Play,
            _ => TurnAction::Discard,
        }
    }

    fn decide_card_to_play_index(&mut self, state: &GameState, player: PlayerId) -> usize {
        match self.first_candidate(state, player) {
            Ok(Some((_, candidate))) => candidate.hand_index,
            _ => 0,
        }
    }

    fn decide_cards_to_discard_indices(&mut self, state: &GameState, player: PlayerId) -> Vec<usize> {
        discard_indices(state, player).unwrap_or_default()
    }

    fn decide_turn(&mut self, state: &GameState, player: PlayerId) -> Result<Decision, EngineError> {
        match self.first_candidate(state, player)? {
            Some((rule, candidate)) => {
                debug!(player = %player, rule = %rule, card = %candidate.card, "rule applies");
                Ok(Decision::Play {
                    hand_index: candidate.hand_index,
                    moves: candidate.moves,
                })
            }
            None => Ok(Decision::Discard {
                hand_indices: discard_indices(state, player)?,
            }),
        }
    }
}
