//! One-ply lookahead over the play rules.
//!
//! For every rule that proposes a play, the strategy clones the game,
//! resolves the proposal on the clone and scores how much the organ balance
//! moved in its favor:
//!
//! ```text
//! balance = Σ opponent organ states − Σ own organ states
//! score   = balance_before − balance_after (+ win bonus if the clone is won)
//! ```
//!
//! The highest score wins; ties keep the rule listed first. The winning
//! rule is then asked again against the live state, and that proposal is
//! what gets played. The clone is copy-on-write (`im`), so simulating a
//! play costs little and never touches the live game.

use std::time::Instant;

use tracing::{debug, trace};

use super::config::LookaheadConfig;
use super::provider::{DecisionProvider, TargetChooser};
use super::rule_based::{first_organ_color, largest_body_opponent};
use super::rules::{discard_indices, Rule};
use super::stats::SearchStats;
use crate::cards::{Card, Color};
use crate::core::action::{Decision, TurnAction};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::resolution::resolve_play;

/// Organ balance seen from `me`: opponents' total minus our own.
pub fn organ_balance(state: &GameState, me: PlayerId) -> Result<i32, EngineError> {
    let mut balance = 0;
    for (id, player) in state.players() {
        let total = player.state_total()?;
        if id == me {
            balance -= total;
        } else {
            balance += total;
        }
    }
    Ok(balance)
}

/// Strategy that simulates each rule's proposal and plays the best one.
#[derive(Clone, Debug, Default)]
pub struct LookaheadStrategy {
    config: LookaheadConfig,
    stats: SearchStats,
}

impl LookaheadStrategy {
    #[must_use]
    pub fn new(config: LookaheadConfig) -> Self {
        Self {
            config,
            stats: SearchStats::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &LookaheadConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Score `rule` for `me` by playing its proposal on a clone.
    ///
    /// `None` if the rule has nothing to propose.
    pub fn evaluate(&mut self, state: &GameState, me: PlayerId, rule: Rule) -> Result<Option<i32>, EngineError> {
        let mut sim = state.clone_state();
        let Some(candidate) = rule.apply(&sim, me)? else {
            return Ok(None);
        };

        let before = organ_balance(&sim, me)?;
        resolve_play(&mut sim, me, candidate.hand_index, &candidate.moves)?;
        let after = organ_balance(&sim, me)?;
        self.stats.simulations += 1;

        let mut score = before - after;
        if sim.has_won(me)? {
            self.stats.winning_simulations += 1;
            score += self.config.win_bonus;
        }

        trace!(player = %me, rule = %rule, card = %candidate.card, score, "simulated");
        Ok(Some(score))
    }

    /// The best-scoring rule, if any rule applies.
    pub fn best_rule(&mut self, state: &GameState, me: PlayerId) -> Result<Option<(Rule, i32)>, EngineError> {
        let mut best: Option<(Rule, i32)> = None;
        let rules = self.config.rules.clone();
        for rule in rules {
            if let Some(score) = self.evaluate(state, me, rule)? {
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((rule, score));
                }
            }
        }
        Ok(best)
    }

    fn discard(&mut self, state: &GameState, me: PlayerId) -> Result<Decision, EngineError> {
        self.stats.discards += 1;
        Ok(Decision::Discard {
            hand_indices: discard_indices(state, me)?,
        })
    }
}

impl TargetChooser for LookaheadStrategy {
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

impl DecisionProvider for LookaheadStrategy {
    fn decide_action(&mut self, state: &GameState, player: PlayerId) -> TurnAction {
        match self.best_rule(state, player) {
            Ok(Some(_)) => TurnAction::Play,
            _ => TurnAction::Discard,
        }
    }

    fn decide_card_to_play_index(&mut self, state: &GameState, player: PlayerId) -> usize {
        let candidate = match self.best_rule(state, player) {
            Ok(Some((rule, _))) => rule.apply(state, player).ok().flatten(),
            _ => None,
        };
        candidate.map_or(0, |c| c.hand_index)
    }

    fn decide_cards_to_discard_indices(&mut self, state: &GameState, player: PlayerId) -> Vec<usize> {
        discard_indices(state, player).unwrap_or_default()
    }

    fn decide_turn(&mut self, state: &GameState, player: PlayerId) -> Result<Decision, EngineError> {
        let start = Instant::now();
        self.stats.decisions += 1;

        let best = self.best_rule(state, player)?;
        self.stats.last_best_score = best.map(|(_, score)| score);

        let decision = match best {
            Some((rule, score)) => match rule.apply(state, player)? {
                Some(candidate) if !candidate.moves.is_empty() => {
                    debug!(player = %player, rule = %rule, score, card = %candidate.card, "lookahead pick");
                    Decision::Play {
                        hand_index: candidate.hand_index,
                        moves: candidate.moves,
                    }
                }
                _ => self.discard(state, player)?,
            },
            None => self.discard(state, player)?,
        };

        self.stats.time_us += start.elapsed().as_micros() as u64;
        Ok(decision)
    }
}
