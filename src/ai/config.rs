//! Lookahead strategy configuration.

use serde::{Deserialize, Serialize};

use super::rules::Rule;

/// Configuration for [`crate::ai::LookaheadStrategy`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookaheadConfig {
    /// Bonus added to a candidate whose simulated play wins the game.
    pub win_bonus: i32,

    /// Rules evaluated, in order. Equal scores keep the earliest rule.
    pub rules: Vec<Rule>,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            win_bonus: 100,
            rules: Rule::LOOKAHEAD_ORDER.to_vec(),
        }
    }
}

impl LookaheadConfig {
    /// Set the win bonus.
    #[must_use]
    pub fn with_win_bonus(mut self, bonus: i32) -> Self {
        self.win_bonus = bonus;
        self
    }

    /// Set the rules to evaluate.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }
}
